//! Domain-level error types.

use thiserror::Error;

use crate::ports::SessionError;

/// Domain errors - failures surfaced by the controller and services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not signed in")]
    Unauthorized,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Errors raised by API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    Decode(String),

    /// The server accepted the request but reported `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No session token available")]
    MissingToken,

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the failure means the stored credentials are no longer valid.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::MissingToken)
    }

    /// Prefer the server's own wording where there is one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. }
            | ApiError::Rejected(message)
            | ApiError::Unauthorized(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}
