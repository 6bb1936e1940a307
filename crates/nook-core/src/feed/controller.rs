use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Comment, NewPost, Post};
use crate::error::DomainError;
use crate::ports::{FeedQuery, Notification, Notifier, PostApi, PostQuery, SessionStore};

use super::page::{FeedPhase, PageOutcome, PageState, RequestTicket};
use super::scroll::ScrollMetrics;
use super::state::FeedState;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// What to do with an optimistic like when the server call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LikeFailurePolicy {
    /// Leave the optimistic state in place; the next full reload corrects drift.
    #[default]
    Keep,
    /// Restore the membership the post had before the toggle.
    Rollback,
}

impl FromStr for LikeFailurePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(LikeFailurePolicy::Keep),
            "rollback" => Ok(LikeFailurePolicy::Rollback),
            other => Err(DomainError::Validation(format!(
                "Unknown like failure policy: {other}"
            ))),
        }
    }
}

/// Feed controller configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: u32,
    pub like_failure: LikeFailurePolicy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            like_failure: LikeFailurePolicy::default(),
        }
    }
}

/// Drives a [`FeedState`] against the Post API.
///
/// The state lock is never held across a network call, so scroll events and
/// user actions arriving while a page is loading see the loading flags and
/// are suppressed rather than queued. Every failure is reported to the
/// notifier and also returned to the caller.
pub struct FeedController {
    api: Arc<dyn PostApi>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    config: FeedConfig,
    state: Mutex<FeedState>,
}

impl FeedController {
    pub fn new(
        api: Arc<dyn PostApi>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        config: FeedConfig,
    ) -> Self {
        let state = Mutex::new(FeedState::new(config.page_size));
        Self {
            api,
            session,
            notifier,
            config,
            state,
        }
    }

    pub async fn phase(&self) -> FeedPhase {
        self.state.lock().await.phase()
    }

    pub async fn page_state(&self) -> PageState {
        self.state.lock().await.page().clone()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts().to_vec()
    }

    pub async fn post(&self, post_id: &str) -> Option<Post> {
        self.state.lock().await.post(post_id).cloned()
    }

    /// Load page 1 for the active filter, discarding whatever is loaded.
    pub async fn mount(&self) -> Result<PageOutcome, DomainError> {
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            let filter = state.page().filter.clone();
            let ticket = state.begin_initial(filter);
            (ticket, state.query_for(&ticket))
        };
        self.fetch(ticket, query).await
    }

    /// Same as [`mount`](Self::mount): start again from page 1.
    pub async fn refresh(&self) -> Result<PageOutcome, DomainError> {
        self.mount().await
    }

    /// Switch to a new filter and load its first page.
    ///
    /// Setting the filter that is already active on a mounted feed is a no-op.
    pub async fn set_filter(&self, filter: FeedQuery) -> Result<PageOutcome, DomainError> {
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            if state.phase() != FeedPhase::Idle && state.page().filter == filter {
                return Ok(PageOutcome::Skipped);
            }
            tracing::debug!(filter = ?filter, "Feed filter changed");
            let ticket = state.begin_initial(filter);
            (ticket, state.query_for(&ticket))
        };
        self.fetch(ticket, query).await
    }

    /// Handle a scroll report from the viewport.
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> Result<PageOutcome, DomainError> {
        if !metrics.is_near_bottom() {
            return Ok(PageOutcome::Skipped);
        }
        self.load_more().await
    }

    /// Fetch the next page if one exists and nothing else is loading.
    pub async fn load_more(&self) -> Result<PageOutcome, DomainError> {
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            match state.begin_more() {
                Some(ticket) => (ticket, state.query_for(&ticket)),
                None => return Ok(PageOutcome::Skipped),
            }
        };
        self.fetch(ticket, query).await
    }

    async fn fetch(
        &self,
        ticket: RequestTicket,
        query: PostQuery,
    ) -> Result<PageOutcome, DomainError> {
        tracing::debug!(
            page = query.page,
            limit = query.limit,
            generation = ticket.generation,
            "Requesting feed page"
        );

        let result = self.api.list_posts(&query).await;

        let mut state = self.state.lock().await;
        match state.complete(ticket, result) {
            Ok(PageOutcome::Discarded) => {
                tracing::debug!(
                    page = ticket.page,
                    generation = ticket.generation,
                    current_generation = state.generation(),
                    "Discarded stale feed page"
                );
                Ok(PageOutcome::Discarded)
            }
            Ok(outcome) => {
                tracing::debug!(
                    outcome = ?outcome,
                    total = state.posts().len(),
                    has_next_page = state.page().has_next_page,
                    "Feed page applied"
                );
                Ok(outcome)
            }
            Err(err) => {
                drop(state);
                tracing::warn!(page = ticket.page, error = %err, "Failed to load feed page");
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(format!(
                    "Could not load posts: {}",
                    err.user_message()
                )));
                Err(err)
            }
        }
    }

    /// Like or unlike a post as the signed-in user.
    ///
    /// The like set is updated before the request is sent. Returns the new
    /// membership, or `None` if the post is not in the feed.
    pub async fn toggle_like(&self, post_id: &str) -> Result<Option<bool>, DomainError> {
        let Some(user) = self.session.current_user().await else {
            self.notifier
                .notify(Notification::error("Please log in to like posts"));
            return Err(DomainError::Unauthorized);
        };

        let liked = {
            let mut state = self.state.lock().await;
            let Some(post) = state.post(post_id) else {
                return Ok(None);
            };
            let liked = !post.is_liked_by(&user.id);
            state.set_liked(post_id, &user.id, liked);
            liked
        };

        match self.api.toggle_like(post_id).await {
            Ok(()) => Ok(Some(liked)),
            Err(err) => {
                tracing::warn!(post_id = %post_id, liked, error = %err, "Like toggle failed");
                if self.config.like_failure == LikeFailurePolicy::Rollback {
                    self.state
                        .lock()
                        .await
                        .set_liked(post_id, &user.id, !liked);
                }
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(format!(
                    "Could not update like: {}",
                    err.user_message()
                )));
                Err(err)
            }
        }
    }

    /// Comment on a post. The stored comment is the one the server returns.
    pub async fn add_comment(&self, post_id: &str, text: &str) -> Result<Comment, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }
        if self.state.lock().await.post(post_id).is_none() {
            return Err(DomainError::NotFound {
                entity_type: "post",
                id: post_id.to_string(),
            });
        }

        match self.api.create_comment(post_id, text).await {
            Ok(comment) => {
                let appended = self
                    .state
                    .lock()
                    .await
                    .append_comment(post_id, comment.clone());
                if !appended {
                    tracing::debug!(post_id = %post_id, "Post left the feed before comment landed");
                }
                Ok(comment)
            }
            Err(err) => {
                tracing::warn!(post_id = %post_id, error = %err, "Comment failed");
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(format!(
                    "Could not add comment: {}",
                    err.user_message()
                )));
                Err(err)
            }
        }
    }

    /// Publish a post, then reload the feed from page 1 so it shows up.
    pub async fn create_post(&self, post: NewPost) -> Result<String, DomainError> {
        post.validate()?;

        let message = match self.api.create_post(&post).await {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "Post creation failed");
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(format!(
                    "Could not create post: {}",
                    err.user_message()
                )));
                return Err(err);
            }
        };

        tracing::info!(post_type = %post.post_type, images = post.images.len(), "Post created");
        self.notifier.notify(Notification::success(if message.is_empty() {
            "Post created".to_string()
        } else {
            message.clone()
        }));

        // A failed reload has already been reported; the post itself went through.
        let _ = self.refresh().await;
        Ok(message)
    }
}
