use tokio::sync::watch;

use crate::{
    error::ApiResult,
    models::{Identity, User},
    services::auth::AuthClient,
};

/// In-memory authentication session
///
/// Holds the current identity and publishes every change to subscribers;
/// the recommendation feed re-initializes on each published identity.
/// Purely session state - nothing survives a process restart.
pub struct AuthSession {
    identity: watch::Sender<Identity>,
}

impl AuthSession {
    pub fn new() -> Self {
        let (identity, _) = watch::channel(Identity::absent());
        Self { identity }
    }

    pub fn current(&self) -> Identity {
        self.identity.borrow().clone()
    }

    /// Receiver that observes every identity change.
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.identity.borrow().is_absent()
    }

    pub fn sign_in(&self, user_id: impl Into<String>, token: impl Into<String>) {
        let identity = Identity::authenticated(user_id, token);
        tracing::info!(user_id = ?identity.user_id, "Signed in");
        self.identity.send_replace(identity);
    }

    pub fn sign_out(&self) {
        tracing::info!("Signed out");
        self.identity.send_replace(Identity::absent());
    }

    /// Validate a remembered token against the profile endpoint and adopt
    /// it on success. On failure the session stays signed out.
    pub async fn restore(&self, auth: &AuthClient, token: &str) -> ApiResult<User> {
        match auth.profile(token).await {
            Ok(user) => {
                self.sign_in(user.id.clone(), token);
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Stored token rejected");
                self.sign_out();
                Err(err)
            }
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_signed_out() {
        let session = AuthSession::new();
        assert!(!session.is_authenticated());
        assert!(session.current().is_absent());
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = AuthSession::new();
        session.sign_in("u1", "t1");
        assert!(session.is_authenticated());
        assert_eq!(session.current().user_id.as_deref(), Some("u1"));

        session.sign_out();
        assert!(session.current().is_absent());
    }

    #[tokio::test]
    async fn test_subscribers_observe_identity_changes() {
        let session = AuthSession::new();
        let mut changes = session.subscribe();

        session.sign_in("u1", "t1");
        changes.changed().await.unwrap();
        assert!(!changes.borrow_and_update().is_absent());

        session.sign_out();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().is_absent());
    }
}
