use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
};

/// HTTP header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared HTTP client for the movie API backend
///
/// Owns the base URL and the underlying connection pool; the endpoint
/// clients clone this cheaply. Every outgoing request carries a fresh
/// `x-request-id` so failures can be correlated with server logs.
#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client with default settings pointing at the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http_client
            .get(self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http_client
            .put(self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http_client
            .delete(self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }

    /// Check the status and parse the body into the expected shape.
    ///
    /// Non-success statuses become `ApiError::Server` with the body text
    /// as the message; a body that fails to parse becomes
    /// `ApiError::InvalidResponse` rather than partial data.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text,
                "Failed to parse API response"
            );
            ApiError::InvalidResponse(e.to_string())
        })
    }

    /// Check the status of a response whose body does not matter.
    pub(crate) async fn read_empty(response: Response) -> ApiResult<()> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
