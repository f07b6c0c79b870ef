use crate::{
    error::{ApiError, ApiResult},
    models::{NewReview, Review, ReviewUpdate},
    services::client::ApiClient,
};

/// Client for the movie review endpoints
///
/// Reading reviews is public; writing requires a bearer token.
#[derive(Clone)]
pub struct ReviewsClient {
    api: ApiClient,
}

impl ReviewsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All reviews for one movie.
    pub async fn for_movie(&self, movie_id: &str) -> ApiResult<Vec<Review>> {
        let response = self
            .api
            .get(&format!("/api/reviews/{}", movie_id))
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    pub async fn create(&self, token: &str, review: &NewReview) -> ApiResult<Review> {
        if review.content.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Review content cannot be empty".to_string(),
            ));
        }

        let response = self
            .api
            .post("/api/reviews/")
            .bearer_auth(token)
            .json(review)
            .send()
            .await?;
        let created: Review = ApiClient::read_json(response).await?;

        tracing::info!(
            review_id = %created.id,
            movie_id = %created.movie_id,
            "Review created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        token: &str,
        review_id: &str,
        update: &ReviewUpdate,
    ) -> ApiResult<Review> {
        if update.content.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Review content cannot be empty".to_string(),
            ));
        }

        let response = self
            .api
            .put(&format!("/api/reviews/{}", review_id))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    pub async fn delete(&self, token: &str, review_id: &str) -> ApiResult<()> {
        let response = self
            .api
            .delete(&format!("/api/reviews/{}", review_id))
            .bearer_auth(token)
            .send()
            .await?;
        ApiClient::read_empty(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let reviews = ReviewsClient::new(ApiClient::with_base_url("http://unused.local"));
        let review = NewReview {
            movie_id: "603".to_string(),
            content: "   ".to_string(),
            rating: None,
        };
        let result = reviews.create("token", &review).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }
}
