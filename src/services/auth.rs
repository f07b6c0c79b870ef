use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    models::User,
    services::client::ApiClient,
};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful login payload: the profile plus the bearer token every
/// authenticated endpoint expects
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Fields the profile endpoint accepts for update
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Client for the auth and profile endpoints
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        let response = self
            .api
            .post("/api/auth/login")
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let login: LoginResponse = ApiClient::read_json(response).await?;

        tracing::info!(user_id = %login.user.id, "Logged in");
        Ok(login)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        if request.username.trim().is_empty() || request.email.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Username and email are required".to_string(),
            ));
        }

        let response = self
            .api
            .post("/api/auth/register")
            .json(request)
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    /// Profile of the token's owner.
    pub async fn profile(&self, token: &str) -> ApiResult<User> {
        let response = self
            .api
            .get("/api/user/profile")
            .bearer_auth(token)
            .send()
            .await?;
        ApiClient::read_json(response).await
    }

    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<User> {
        let response = self
            .api
            .put("/api/user/profile")
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        ApiClient::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_rejects_empty_credentials() {
        let auth = AuthClient::new(ApiClient::with_base_url("http://unused.local"));
        let result = auth.login("", "secret").await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            username: Some("neo".to_string()),
            email: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("username"));
        assert!(!json.contains("email"));
    }
}
