use std::sync::Arc;

use crate::domain::{Post, User};
use crate::error::DomainError;
use crate::ports::{Notification, Notifier, PostApi, SessionStore};

/// The signed-in user with everything they have posted.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub posts: Vec<Post>,
}

pub struct ProfileService {
    api: Arc<dyn PostApi>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl ProfileService {
    pub fn new(
        api: Arc<dyn PostApi>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    pub async fn load(&self) -> Result<Profile, DomainError> {
        let user = self
            .session
            .current_user()
            .await
            .ok_or(DomainError::Unauthorized)?;

        let posts = match self.api.list_user_posts().await {
            Ok(posts) => posts,
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "Failed to load profile posts");
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(format!(
                    "Could not load your posts: {}",
                    err.user_message()
                )));
                return Err(err);
            }
        };

        tracing::debug!(user_id = %user.id, posts = posts.len(), "Profile loaded");
        Ok(Profile { user, posts })
    }
}
