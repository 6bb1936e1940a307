//! Post API port - the feed's view of the remote REST API.

use async_trait::async_trait;

use crate::domain::{Comment, NewPost, Post, PostType};
use crate::error::ApiError;

/// Active feed filter. Any change to it restarts pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub post_type: Option<PostType>,
    pub location: Option<String>,
}

impl FeedQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_type(post_type: PostType) -> Self {
        Self {
            post_type: Some(post_type),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = (!location.trim().is_empty()).then_some(location);
        self
    }
}

/// Parameters of a single `listPosts` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub filter: FeedQuery,
}

/// One page of the feed.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub has_next_page: bool,
}

/// Post API client trait. Implementations attach the session token to every call.
#[async_trait]
pub trait PostApi: Send + Sync {
    /// Fetch one page of the feed.
    async fn list_posts(&self, query: &PostQuery) -> Result<PostPage, ApiError>;

    /// Fetch every post written by the signed-in user.
    async fn list_user_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// Publish a post. Returns the server's confirmation message.
    async fn create_post(&self, post: &NewPost) -> Result<String, ApiError>;

    /// Flip the signed-in user's like on a post, server-side.
    async fn toggle_like(&self, post_id: &str) -> Result<(), ApiError>;

    /// Add a comment. Returns the comment as stored by the server.
    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment, ApiError>;
}
