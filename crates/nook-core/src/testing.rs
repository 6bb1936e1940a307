//! Hand-written fakes of the ports, shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use crate::domain::{Author, Comment, NewPost, Post, Session, SignupForm, User};
use crate::error::ApiError;
use crate::ports::{
    AuthApi, AuthGrant, Notification, NotificationLevel, Notifier, PostApi, PostPage, PostQuery,
    SessionError, SessionStore,
};

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        username: id.to_string(),
        avatar_url: None,
        bio: None,
    }
}

pub fn author(id: &str) -> Author {
    Author {
        id: id.to_string(),
        name: format!("User {id}"),
        username: id.to_string(),
        avatar_url: None,
    }
}

pub fn post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        author: author("author"),
        content: format!("Post {id}"),
        images: Vec::new(),
        location: None,
        post_type: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        likes: Vec::new(),
        comments: Vec::new(),
    }
}

/// Posts `prefix-start` through `prefix-(start + count - 1)`.
pub fn posts(prefix: &str, start: usize, count: usize) -> Vec<Post> {
    (start..start + count)
        .map(|i| post(&format!("{prefix}-{i}")))
        .collect()
}

pub fn comment(id: &str, content: &str) -> Comment {
    Comment {
        id: id.to_string(),
        author: author("me"),
        content: content.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
    }
}

struct ScriptedPage {
    result: Result<PostPage, ApiError>,
    gate: Option<Arc<Notify>>,
}

/// Post API that replays scripted responses and records every call.
///
/// Unscripted page requests return an empty, final page; unscripted likes,
/// comments and posts succeed.
#[derive(Default)]
pub struct FakePostApi {
    pages: Mutex<VecDeque<ScriptedPage>>,
    list_calls: Mutex<Vec<PostQuery>>,
    like_results: Mutex<VecDeque<Result<(), ApiError>>>,
    like_calls: Mutex<Vec<String>>,
    comment_results: Mutex<VecDeque<Result<Comment, ApiError>>>,
    comment_calls: Mutex<Vec<(String, String)>>,
    create_results: Mutex<VecDeque<Result<String, ApiError>>>,
    create_calls: Mutex<Vec<String>>,
    user_posts: Mutex<Vec<Post>>,
}

impl FakePostApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, posts: Vec<Post>, has_next_page: bool) {
        self.pages.lock().unwrap().push_back(ScriptedPage {
            result: Ok(PostPage {
                posts,
                has_next_page,
            }),
            gate: None,
        });
    }

    pub fn push_page_error(&self, err: ApiError) {
        self.pages.lock().unwrap().push_back(ScriptedPage {
            result: Err(err),
            gate: None,
        });
    }

    /// Script a page whose response is held back until the returned gate is notified.
    pub fn push_gated_page(&self, posts: Vec<Post>, has_next_page: bool) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.pages.lock().unwrap().push_back(ScriptedPage {
            result: Ok(PostPage {
                posts,
                has_next_page,
            }),
            gate: Some(gate.clone()),
        });
        gate
    }

    pub fn fail_next_like(&self, err: ApiError) {
        self.like_results.lock().unwrap().push_back(Err(err));
    }

    pub fn push_comment(&self, result: Result<Comment, ApiError>) {
        self.comment_results.lock().unwrap().push_back(result);
    }

    pub fn push_create(&self, result: Result<String, ApiError>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn set_user_posts(&self, posts: Vec<Post>) {
        *self.user_posts.lock().unwrap() = posts;
    }

    pub fn list_calls(&self) -> Vec<PostQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.list_calls().iter().map(|q| q.page).collect()
    }

    pub fn like_calls(&self) -> Vec<String> {
        self.like_calls.lock().unwrap().clone()
    }

    pub fn comment_calls(&self) -> Vec<(String, String)> {
        self.comment_calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.create_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostApi for FakePostApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<PostPage, ApiError> {
        self.list_calls.lock().unwrap().push(query.clone());
        let scripted = self.pages.lock().unwrap().pop_front();
        let Some(scripted) = scripted else {
            return Ok(PostPage::default());
        };
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        scripted.result
    }

    async fn list_user_posts(&self) -> Result<Vec<Post>, ApiError> {
        Ok(self.user_posts.lock().unwrap().clone())
    }

    async fn create_post(&self, post: &NewPost) -> Result<String, ApiError> {
        self.create_calls.lock().unwrap().push(post.content.clone());
        let scripted = self.create_results.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok("Post created successfully".to_string()))
    }

    async fn toggle_like(&self, post_id: &str) -> Result<(), ApiError> {
        self.like_calls.lock().unwrap().push(post_id.to_string());
        let scripted = self.like_results.lock().unwrap().pop_front();
        scripted.unwrap_or(Ok(()))
    }

    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment, ApiError> {
        self.comment_calls
            .lock()
            .unwrap()
            .push((post_id.to_string(), content.to_string()));
        let scripted = self.comment_results.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(comment("c-server", content)))
    }
}

/// Auth API with one scripted result per operation.
#[derive(Default)]
pub struct FakeAuthApi {
    pub grant: Mutex<Option<Result<AuthGrant, ApiError>>>,
    pub authenticate_result: Mutex<Option<Result<(), ApiError>>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeAuthApi {
    pub fn granting(token: &str, user: User, message: &str) -> Self {
        let api = Self::default();
        *api.grant.lock().unwrap() = Some(Ok(AuthGrant {
            session: Session {
                token: token.to_string(),
                user,
            },
            message: message.to_string(),
        }));
        api
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn take_grant(&self) -> Result<AuthGrant, ApiError> {
        self.grant
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ApiError::Unauthorized("Invalid credentials".into())))
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn signup(&self, _form: &SignupForm) -> Result<AuthGrant, ApiError> {
        self.calls.lock().unwrap().push("signup");
        self.take_grant()
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<AuthGrant, ApiError> {
        self.calls.lock().unwrap().push("login");
        self.take_grant()
    }

    async fn authenticate(&self) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push("authenticate");
        self.authenticate_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(()))
    }
}

/// Session held in memory.
#[derive(Default)]
pub struct FakeSession {
    session: Mutex<Option<Session>>,
}

impl FakeSession {
    pub fn signed_in(user_id: &str) -> Self {
        Self {
            session: Mutex::new(Some(Session {
                token: format!("token-{user_id}"),
                user: user(user_id),
            })),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for FakeSession {
    async fn token(&self) -> Option<String> {
        self.snapshot().map(|s| s.token)
    }

    async fn current_user(&self) -> Option<User> {
        self.snapshot().map(|s| s.user)
    }

    async fn save(&self, session: Session) -> Result<(), SessionError> {
        *self.session.lock().unwrap() = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

/// Notifier that keeps everything it is sent.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationLevel::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationLevel::Success)
    }

    fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}
