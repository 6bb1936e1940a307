//! Application state - the adapters wired into the services.

use std::sync::Arc;

use anyhow::Context;

use nook_core::FeedController;
use nook_core::ports::{AuthApi, Notifier, PostApi, SessionStore};
use nook_core::services::{AuthService, ProfileService};
use nook_infra::{ApiClient, FileSessionStore, HttpAuthApi, HttpPostApi, InMemoryNotifier};

use crate::config::AppConfig;
use crate::notifier::ConsoleNotifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<dyn SessionStore>,
    pub notices: Arc<InMemoryNotifier>,
    pub feed: Arc<FeedController>,
    pub auth: Arc<AuthService>,
    pub profile: Arc<ProfileService>,
}

impl AppState {
    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let session: Arc<dyn SessionStore> = Arc::new(
            FileSessionStore::open(&config.session_file)
                .await
                .with_context(|| {
                    format!("opening session file {}", config.session_file.display())
                })?,
        );

        let client = Arc::new(
            ApiClient::new(config.api.clone(), session.clone())
                .context("building the API client")?,
        );
        let posts: Arc<dyn PostApi> = Arc::new(HttpPostApi::new(client.clone()));
        let auth_api: Arc<dyn AuthApi> = Arc::new(HttpAuthApi::new(client));

        let notices = Arc::new(InMemoryNotifier::new(config.notification_ttl));
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new(notices.clone()));

        let feed = Arc::new(FeedController::new(
            posts.clone(),
            session.clone(),
            notifier.clone(),
            config.feed.clone(),
        ));
        let auth = Arc::new(AuthService::new(auth_api, session.clone(), notifier.clone()));
        let profile = Arc::new(ProfileService::new(posts, session.clone(), notifier));

        tracing::info!(
            api = %config.api.base_url,
            page_size = config.feed.page_size,
            like_failure = ?config.feed.like_failure,
            "Application state initialized"
        );

        Ok(Self {
            session,
            notices,
            feed,
            auth,
            profile,
        })
    }
}
