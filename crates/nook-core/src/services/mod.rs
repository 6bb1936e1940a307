//! Application services built on the ports: sign-in flows and the profile view.

mod auth;
mod profile;

pub use auth::AuthService;
pub use profile::{Profile, ProfileService};
