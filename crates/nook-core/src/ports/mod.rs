//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth_api;
mod notifier;
mod post_api;
mod session;

pub use auth_api::{AuthApi, AuthGrant};
pub use notifier::{Notification, NotificationLevel, Notifier};
pub use post_api::{FeedQuery, PostApi, PostPage, PostQuery};
pub use session::{SessionError, SessionStore};
