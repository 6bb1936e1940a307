//! Post API over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use nook_core::domain::{Comment, NewPost, Post};
use nook_core::error::ApiError;
use nook_core::ports::{PostApi, PostPage, PostQuery};
use nook_shared::MessageResponse;
use nook_shared::dto::{
    CommentCreatedResponse, CreateCommentRequest, PostListResponse, UserPostsResponse,
};

use super::client::ApiClient;

pub struct HttpPostApi {
    client: Arc<ApiClient>,
}

impl HttpPostApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn post_form(post: &NewPost) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("content", post.content.clone())
            .text("location", post.location.clone().unwrap_or_default())
            .text("type", post.post_type.as_str());

        for image in &post.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|e| ApiError::Config(format!("{}: {e}", image.file_name)))?;
            form = form.part("images", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl PostApi for HttpPostApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<PostPage, ApiError> {
        let post_type = query
            .filter
            .post_type
            .map(|t| t.as_str())
            .unwrap_or_default();
        let location = query.filter.location.as_deref().unwrap_or_default();

        let request = self
            .client
            .authorized(Method::GET, &["posts"])
            .await?
            .query(&[
                ("page", query.page.to_string()),
                ("limit", query.limit.to_string()),
                ("type", post_type.to_string()),
                ("location", location.to_string()),
            ]);

        let body: PostListResponse<Post> = self.client.send_json(request).await?;
        tracing::debug!(
            page = query.page,
            received = body.posts.len(),
            has_next_page = body.pagination.has_next_page,
            "Fetched posts"
        );

        Ok(PostPage {
            posts: body.posts,
            has_next_page: body.pagination.has_next_page,
        })
    }

    async fn list_user_posts(&self) -> Result<Vec<Post>, ApiError> {
        let request = self
            .client
            .authorized(Method::GET, &["posts", "user"])
            .await?;
        let body: UserPostsResponse<Post> = self.client.send_json(request).await?;
        Ok(body.posts)
    }

    async fn create_post(&self, post: &NewPost) -> Result<String, ApiError> {
        let form = Self::post_form(post)?;
        let request = self
            .client
            .authorized(Method::POST, &["posts"])
            .await?
            .multipart(form);

        let body: MessageResponse = self.client.send_json(request).await?;
        if !body.success {
            return Err(ApiError::Rejected(body.message));
        }
        Ok(body.message)
    }

    async fn toggle_like(&self, post_id: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .authorized(Method::POST, &["posts", post_id, "like"])
            .await?
            .json(&serde_json::json!({}));
        self.client.send_unit(request).await
    }

    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment, ApiError> {
        let request = self
            .client
            .authorized(Method::POST, &["posts", post_id, "comment"])
            .await?
            .json(&CreateCommentRequest {
                content: content.to_string(),
            });

        let body: CommentCreatedResponse<Comment> = self.client.send_json(request).await?;
        match body.comment {
            Some(comment) if body.success => Ok(comment),
            _ => Err(ApiError::Rejected(
                body.message
                    .unwrap_or_else(|| "Comment was not saved".to_string()),
            )),
        }
    }
}
