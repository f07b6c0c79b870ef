use crate::{
    error::{ApiError, ApiResult},
    models::{Identity, RecommendationPage},
    services::client::ApiClient,
};

/// Source of recommendation pages for a subject
///
/// The feed engine only sees this trait, so tests drive the engine with
/// scripted sources and the binary plugs in the HTTP implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Fetch one page of recommendations.
    ///
    /// Fails with `MissingCredential` before any network activity when
    /// the identity has no token. Does not retry; retry policy belongs
    /// to the caller.
    async fn fetch_page(
        &self,
        identity: &Identity,
        page: u32,
        page_size: u32,
    ) -> ApiResult<RecommendationPage>;
}

/// HTTP implementation against the recommendation endpoint
#[derive(Clone)]
pub struct HttpRecommendationSource {
    api: ApiClient,
}

impl HttpRecommendationSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl RecommendationSource for HttpRecommendationSource {
    async fn fetch_page(
        &self,
        identity: &Identity,
        page: u32,
        page_size: u32,
    ) -> ApiResult<RecommendationPage> {
        let token = identity
            .token
            .as_deref()
            .ok_or(ApiError::MissingCredential)?;

        let response = self
            .api
            .get("/recommendations")
            .bearer_auth(token)
            .query(&[("page", page.to_string()), ("limit", page_size.to_string())])
            .send()
            .await?;

        let body: RecommendationPage = ApiClient::read_json(response).await?;

        tracing::info!(
            page = page,
            returned = body.movies.len(),
            total = body.total,
            "Recommendation page fetched"
        );

        Ok(body)
    }
}
