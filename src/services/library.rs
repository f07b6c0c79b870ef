use serde::{Deserialize, Serialize};

use crate::{
    error::ApiResult,
    models::Movie,
    services::client::ApiClient,
};

/// A movie saved to the user's favorites or watchlist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMovie {
    pub id: String,
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Payload for saving a movie to either list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMovieRequest {
    pub movie_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl SaveMovieRequest {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id.to_string(),
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            overview: movie.overview.clone(),
        }
    }
}

/// Client for the per-user favorites and watchlist endpoints
///
/// Both lists have the same shape and CRUD surface; they differ only in
/// route. All calls require a bearer token.
#[derive(Clone)]
pub struct LibraryClient {
    api: ApiClient,
}

impl LibraryClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn favorites(&self, token: &str) -> ApiResult<Vec<SavedMovie>> {
        self.list("/api/favorite", token).await
    }

    pub async fn add_favorite(
        &self,
        token: &str,
        request: &SaveMovieRequest,
    ) -> ApiResult<SavedMovie> {
        self.add("/api/favorite", token, request).await
    }

    pub async fn remove_favorite(&self, token: &str, id: &str) -> ApiResult<()> {
        self.remove(&format!("/api/favorite/{}", id), token).await
    }

    pub async fn watchlist(&self, token: &str) -> ApiResult<Vec<SavedMovie>> {
        self.list("/api/watchlist", token).await
    }

    pub async fn add_to_watchlist(
        &self,
        token: &str,
        request: &SaveMovieRequest,
    ) -> ApiResult<SavedMovie> {
        self.add("/api/watchlist", token, request).await
    }

    pub async fn remove_from_watchlist(&self, token: &str, id: &str) -> ApiResult<()> {
        self.remove(&format!("/api/watchlist/{}", id), token).await
    }

    async fn list(&self, path: &str, token: &str) -> ApiResult<Vec<SavedMovie>> {
        let response = self.api.get(path).bearer_auth(token).send().await?;
        ApiClient::read_json(response).await
    }

    async fn add(
        &self,
        path: &str,
        token: &str,
        request: &SaveMovieRequest,
    ) -> ApiResult<SavedMovie> {
        let response = self
            .api
            .post(path)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let saved: SavedMovie = ApiClient::read_json(response).await?;
        tracing::info!(movie_id = %saved.movie_id, path = path, "Movie saved");
        Ok(saved)
    }

    async fn remove(&self, path: &str, token: &str) -> ApiResult<()> {
        let response = self.api.delete(path).bearer_auth(token).send().await?;
        ApiClient::read_empty(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_uses_camel_case_wire_names() {
        let request = SaveMovieRequest {
            movie_id: "603".to_string(),
            title: "The Matrix".to_string(),
            poster_path: Some("/matrix.jpg".to_string()),
            overview: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"movieId\":\"603\""));
        assert!(json.contains("\"posterPath\""));
        assert!(!json.contains("movie_id"));
    }

    #[test]
    fn test_save_request_from_movie() {
        let movie = Movie {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/matrix.jpg".to_string()),
            overview: Some("whoa".to_string()),
            vote_average: None,
            release_date: None,
            genre_ids: vec![],
            popularity: None,
        };
        let request = SaveMovieRequest::from_movie(&movie);
        assert_eq!(request.movie_id, "603");
        assert_eq!(request.title, "The Matrix");
    }
}
