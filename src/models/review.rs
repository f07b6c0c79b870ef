use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user review as returned by the reviews endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub movie_id: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub movie_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

/// Payload for editing an existing review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_deserialization() {
        let json = r#"{
            "id": "r1",
            "movie_id": "603",
            "author": "neo",
            "content": "whoa",
            "rating": 4.5
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.author, "neo");
        assert_eq!(review.rating, Some(4.5));
        assert!(review.created_at.is_none());
    }

    #[test]
    fn test_new_review_omits_missing_rating() {
        let review = NewReview {
            movie_id: "603".to_string(),
            content: "whoa".to_string(),
            rating: None,
        };
        let json = serde_json::to_string(&review).unwrap();
        assert!(!json.contains("rating"));
    }
}
