//! # Nook Core
//!
//! The domain layer of the Nook feed client.
//! This crate contains the feed state machine, optimistic reconciliation and
//! the service logic around it, with zero transport dependencies. Everything
//! external (the REST API, session storage, notifications) is reached through
//! the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ApiError, DomainError};
pub use feed::{FeedConfig, FeedController, FeedPhase, LikeFailurePolicy};
