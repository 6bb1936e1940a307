//! reqwest-backed clients for the Nook REST API.

mod auth;
mod client;
mod posts;

pub use auth::HttpAuthApi;
pub use client::{ApiClient, ApiClientConfig};
pub use posts::HttpPostApi;
