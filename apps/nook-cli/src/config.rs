//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use nook_core::{FeedConfig, LikeFailurePolicy};
use nook_infra::ApiClientConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiClientConfig,
    pub feed: FeedConfig,
    pub session_file: PathBuf,
    pub notification_ttl: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_defaults = ApiClientConfig::default();
        let feed_defaults = FeedConfig::default();

        let like_failure = match env::var("LIKE_FAILURE_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to the default like failure policy");
                LikeFailurePolicy::default()
            }),
            Err(_) => feed_defaults.like_failure,
        };

        Self {
            api: ApiClientConfig {
                base_url: env::var("NOOK_API_URL").unwrap_or(api_defaults.base_url),
                timeout: env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(api_defaults.timeout),
            },
            feed: FeedConfig {
                page_size: env::var("FEED_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|size| *size > 0)
                    .unwrap_or(feed_defaults.page_size),
                like_failure,
            },
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".nook/session.json")),
            notification_ttl: env::var("NOTIFICATION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(5)),
        }
    }
}
