use async_trait::async_trait;

use crate::domain::{Session, User};

/// Session store trait - where the bearer token and current user live.
///
/// The feed controller only ever reads from it; writes come from the auth service.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Bearer token for outbound requests, if signed in.
    async fn token(&self) -> Option<String>;

    /// The signed-in user, if any.
    async fn current_user(&self) -> Option<User>;

    /// Persist a new session, replacing any previous one.
    async fn save(&self, session: Session) -> Result<(), SessionError>;

    /// Forget the current session.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage failed: {0}")]
    Storage(String),

    #[error("Session serialization failed: {0}")]
    Serialization(String),
}
