use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Category a post is published under. Also the feed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Recommendation,
    AskForHelp,
    LocalUpdate,
    EventAnnouncement,
}

impl PostType {
    pub const ALL: [PostType; 4] = [
        PostType::Recommendation,
        PostType::AskForHelp,
        PostType::LocalUpdate,
        PostType::EventAnnouncement,
    ];

    /// Value used on the wire and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Recommendation => "recommendation",
            PostType::AskForHelp => "ask_for_help",
            PostType::LocalUpdate => "local_update",
            PostType::EventAnnouncement => "event_announcement",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown post type: {s}")))
    }
}

/// Public profile of whoever wrote a post or comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(
        default,
        rename = "profilePicture",
        alias = "avatarUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
}

/// A user's like on a post.
///
/// The API sends likes either as bare user ids or as `{ "user": id }` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LikeRepr")]
pub struct Like {
    pub user: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LikeRepr {
    Id(String),
    Record {
        #[serde(alias = "userId")]
        user: String,
    },
}

impl From<LikeRepr> for Like {
    fn from(repr: LikeRepr) -> Self {
        match repr {
            LikeRepr::Id(user) | LikeRepr::Record { user } => Like { user },
        }
    }
}

/// Comment on a post. Ids and timestamps are always assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "user")]
    pub author: Author,
    #[serde(alias = "text")]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity as served by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "user")]
    pub author: Author,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    /// Displayed like count.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Set membership of `user_id` in the like set. Returns whether anything changed.
    ///
    /// Keeps at most one like per user, even if the server sent duplicates.
    pub fn set_liked(&mut self, user_id: &str, liked: bool) -> bool {
        let was_liked = self.is_liked_by(user_id);
        if liked {
            if !was_liked {
                self.likes.push(Like {
                    user: user_id.to_string(),
                });
            }
        } else {
            self.likes.retain(|like| like.user != user_id);
        }
        was_liked != liked
    }
}

/// Binary image picked for upload with a new post.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A post being composed, before it is sent to the server.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub location: Option<String>,
    pub post_type: PostType,
    pub images: Vec<ImageAttachment>,
}

impl NewPost {
    pub fn new(content: impl Into<String>, post_type: PostType) -> Self {
        Self {
            content: content.into(),
            location: None,
            post_type,
            images: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.images.push(image);
        self
    }

    /// Reject posts that would be refused anyway, before any network call.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Post content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
