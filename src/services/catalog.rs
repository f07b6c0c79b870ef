use std::cmp::Ordering;

use crate::{
    error::{ApiError, ApiResult},
    models::{CastMember, Genre, Movie, MovieDetails, MoviePage, Trailer},
    services::client::ApiClient,
};

/// Sort order for movie lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Popularity,
    Rating,
    Release,
}

impl SortBy {
    fn as_str(&self) -> &'static str {
        match self {
            SortBy::Popularity => "popularity",
            SortBy::Rating => "rating",
            SortBy::Release => "release",
        }
    }
}

/// Server-side search criteria
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
}

/// Server-side discovery filter
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<SortBy>,
    pub page: Option<u32>,
}

/// Client for the public movie catalog endpoints
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Popular movies, one page at a time.
    pub async fn popular(&self, page: u32) -> ApiResult<MoviePage> {
        let response = self
            .api
            .get("/api/movie/popular")
            .query(&[("page", page.to_string())])
            .send()
            .await?;
        let body: MoviePage = ApiClient::read_json(response).await?;

        tracing::info!(
            page = page,
            results = body.results.len(),
            "Popular movies fetched"
        );
        Ok(body)
    }

    /// Title search with optional genre/year narrowing.
    pub async fn search(&self, query: &SearchQuery) -> ApiResult<MoviePage> {
        if query.title.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Search title cannot be empty".to_string(),
            ));
        }

        let mut params = vec![("title".to_string(), query.title.clone())];
        if let Some(genre) = &query.genre {
            params.push(("genre".to_string(), genre.clone()));
        }
        if let Some(year) = query.year {
            params.push(("year".to_string(), year.to_string()));
        }
        if let Some(page) = query.page {
            params.push(("page".to_string(), page.to_string()));
        }

        let response = self
            .api
            .get("/api/movie/search")
            .query(&params)
            .send()
            .await?;
        let body: MoviePage = ApiClient::read_json(response).await?;

        tracing::info!(
            title = %query.title,
            results = body.results.len(),
            "Movie search completed"
        );
        Ok(body)
    }

    /// Server-side filtered discovery.
    pub async fn filter(&self, filter: &FilterQuery) -> ApiResult<MoviePage> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(genre) = &filter.genre {
            params.push(("genre".to_string(), genre.clone()));
        }
        if let Some(year) = filter.year {
            params.push(("year".to_string(), year.to_string()));
        }
        if let Some(min_rating) = filter.min_rating {
            params.push(("minRating".to_string(), min_rating.to_string()));
        }
        if let Some(sort_by) = filter.sort_by {
            params.push(("sortBy".to_string(), sort_by.as_str().to_string()));
        }
        if let Some(page) = filter.page {
            params.push(("page".to_string(), page.to_string()));
        }

        let response = self
            .api
            .get("/api/movie/filter")
            .query(&params)
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    /// The genre catalog.
    pub async fn genres(&self) -> ApiResult<Vec<Genre>> {
        let response = self.api.get("/api/movie/genres").send().await?;
        ApiClient::read_json(response).await
    }

    /// Full detail record for one movie.
    pub async fn details(&self, movie_id: u64) -> ApiResult<MovieDetails> {
        let response = self
            .api
            .get(&format!("/api/movie/{}", movie_id))
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    /// Cast list for one movie.
    pub async fn credits(&self, movie_id: u64) -> ApiResult<Vec<CastMember>> {
        let response = self
            .api
            .get(&format!("/api/movie/{}/credits", movie_id))
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    /// Trailer reference for one movie.
    pub async fn trailer(&self, movie_id: u64) -> ApiResult<Trailer> {
        let response = self
            .api
            .get(&format!("/api/movie/{}/trailer", movie_id))
            .send()
            .await?;
        ApiClient::read_json(response).await
    }
}

/// Local narrowing applied to an already-fetched list
///
/// The home view refines the page it has in hand without another round
/// trip; only crossing into new pages goes back to the server.
#[derive(Debug, Clone, Default)]
pub struct Refinement {
    pub min_rating: Option<f64>,
    pub min_year: Option<i32>,
    pub sort_by: Option<SortBy>,
}

/// Filter and sort a fetched movie list in place of a server query.
pub fn refine(movies: &[Movie], refinement: &Refinement) -> Vec<Movie> {
    let mut refined: Vec<Movie> = movies
        .iter()
        .filter(|movie| {
            if let Some(min_rating) = refinement.min_rating {
                if movie.vote_average.unwrap_or(0.0) < min_rating {
                    return false;
                }
            }
            if let Some(min_year) = refinement.min_year {
                match movie.release_year() {
                    Some(year) if year >= min_year => {}
                    _ => return false,
                }
            }
            true
        })
        .cloned()
        .collect();

    match refinement.sort_by {
        Some(SortBy::Popularity) => refined.sort_by(|a, b| descending(a.popularity, b.popularity)),
        Some(SortBy::Rating) => refined.sort_by(|a, b| descending(a.vote_average, b.vote_average)),
        Some(SortBy::Release) => refined.sort_by(|a, b| b.release_date.cmp(&a.release_date)),
        None => {}
    }

    refined
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0)
        .partial_cmp(&a.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal)
}
