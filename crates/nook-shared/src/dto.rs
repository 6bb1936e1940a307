//! Data Transfer Objects - request bodies and response envelopes for the API.
//!
//! Envelopes are generic over the item type so callers decide how posts,
//! comments and users are modelled.

use serde::{Deserialize, Serialize};

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub username: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response to signup and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse<U> {
    pub token: String,
    pub user: U,
    #[serde(default)]
    pub message: String,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Response to `POST /posts/{id}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedResponse<C> {
    #[serde(default)]
    pub success: bool,
    pub comment: Option<C>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pagination block of a post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub has_next_page: bool,
}

/// Response to `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse<P> {
    pub posts: Vec<P>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Response to `GET /posts/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPostsResponse<P> {
    #[serde(default = "Vec::new")]
    pub posts: Vec<P>,
}
