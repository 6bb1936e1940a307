//! # Nook Shared
//!
//! Wire types exchanged with the Nook REST API.
//! Kept free of domain logic so the same crate can back a Rust server or a WASM build.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
