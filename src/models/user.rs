use serde::{Deserialize, Serialize};

/// Authenticated user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// The subject the recommendation feed is scoped to
///
/// Either half may be absent: browsing works without a user, and a stored
/// user record can outlive its token. All pagination state is keyed to this
/// pair; any change invalidates accumulated feed state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

impl Identity {
    pub fn authenticated(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: Some(token.into()),
        }
    }

    /// No subject at all - the feed idles rather than fetch.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.user_id.is_none() && self.token.is_none()
    }
}
