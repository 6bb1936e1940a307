//! # Nook Infrastructure
//!
//! Concrete implementations of the ports defined in `nook-core`:
//! HTTP clients for the REST API, session storage and notifications.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No HTTP client, in-memory and file adapters only
//! - `http` - reqwest-backed Post and Auth API clients

pub mod notify;
pub mod session;

#[cfg(feature = "http")]
pub mod http;

// Re-exports
pub use notify::InMemoryNotifier;
pub use session::{FileSessionStore, InMemorySessionStore};

#[cfg(feature = "http")]
pub use http::{ApiClient, ApiClientConfig, HttpAuthApi, HttpPostApi};
