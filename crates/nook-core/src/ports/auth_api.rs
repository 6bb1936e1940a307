//! Authentication API port.

use async_trait::async_trait;

use crate::domain::{Session, SignupForm};
use crate::error::ApiError;

/// Successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub session: Session,
    pub message: String,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account and sign in.
    async fn signup(&self, form: &SignupForm) -> Result<AuthGrant, ApiError>;

    /// Exchange credentials for a session.
    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant, ApiError>;

    /// Check that the stored token is still accepted by the server.
    async fn authenticate(&self) -> Result<(), ApiError>;
}
