pub mod movie;
pub mod review;
pub mod user;

pub use movie::{CastMember, Genre, Movie, MovieDetails, Trailer};
pub use review::{NewReview, Review, ReviewUpdate};
pub use user::{Identity, User};

use serde::{Deserialize, Serialize};

/// One page of catalog results as the movie endpoints return them
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoviePage {
    pub results: Vec<Movie>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

fn default_total_pages() -> u32 {
    1
}

impl MoviePage {
    /// True when pages beyond this one exist.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of the recommendation feed, normalized to items + total
///
/// The wire body also carries `page` and `limit`, echoed back by the
/// server; only `movies` and `total` matter to the accumulator.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RecommendationPage {
    pub movies: Vec<Movie>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_page_has_next() {
        let page = MoviePage {
            results: vec![],
            page: 1,
            total_pages: 3,
        };
        assert!(page.has_next());

        let last = MoviePage {
            results: vec![],
            page: 3,
            total_pages: 3,
        };
        assert!(!last.has_next());
    }

    #[test]
    fn test_movie_page_defaults() {
        let page: MoviePage = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_recommendation_page_rejects_missing_total() {
        let result = serde_json::from_str::<RecommendationPage>(r#"{"movies": []}"#);
        assert!(result.is_err());
    }
}
