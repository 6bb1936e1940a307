//! Auth API over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use nook_core::domain::{Session, SignupForm, User};
use nook_core::error::ApiError;
use nook_core::ports::{AuthApi, AuthGrant};
use nook_shared::dto::{AuthResponse, LoginRequest, SignupRequest};

use super::client::ApiClient;

pub struct HttpAuthApi {
    client: Arc<ApiClient>,
}

impl HttpAuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn into_grant(body: AuthResponse<User>) -> AuthGrant {
    AuthGrant {
        session: Session {
            token: body.token,
            user: body.user,
        },
        message: body.message,
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn signup(&self, form: &SignupForm) -> Result<AuthGrant, ApiError> {
        let request = self
            .client
            .request(Method::POST, &["users", "signup"])
            .json(&SignupRequest {
                name: form.name.trim().to_string(),
                username: form.username.trim().to_string(),
                mobile: form.mobile.trim().to_string(),
                password: form.password.clone(),
                confirm_password: form.confirm_password.clone(),
            });

        let body: AuthResponse<User> = self.client.send_json(request).await?;
        Ok(into_grant(body))
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant, ApiError> {
        let request = self
            .client
            .request(Method::POST, &["users", "login"])
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            });

        let body: AuthResponse<User> = self.client.send_json(request).await?;
        Ok(into_grant(body))
    }

    async fn authenticate(&self) -> Result<(), ApiError> {
        let request = self
            .client
            .authorized(Method::GET, &["users", "authenticate"])
            .await?;
        self.client.send_unit(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::ApiClientConfig;
    use crate::session::InMemorySessionStore;
    use nook_core::ports::SessionStore;
    use nook_shared::ErrorResponse;

    fn api(server: &MockServer, session: Arc<InMemorySessionStore>) -> HttpAuthApi {
        let client = ApiClient::new(
            ApiClientConfig {
                base_url: server.uri(),
                ..ApiClientConfig::default()
            },
            session,
        )
        .unwrap();
        HttpAuthApi::new(Arc::new(client))
    }

    fn auth_body() -> serde_json::Value {
        json!({
            "token": "jwt-abc",
            "user": {
                "_id": "u1",
                "name": "Ada Lovelace",
                "username": "ada",
                "profilePicture": "https://cdn.example.com/ada.png"
            },
            "message": "User logged in successfully"
        })
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .and(body_partial_json(json!({ "username": "ada", "password": "hunter22" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body()))
            .expect(1)
            .mount(&server)
            .await;

        let grant = api(&server, Arc::new(InMemorySessionStore::new()))
            .login("ada", "hunter22")
            .await
            .unwrap();

        assert_eq!(grant.session.token, "jwt-abc");
        assert_eq!(grant.session.user.id, "u1");
        assert_eq!(
            grant.session.user.avatar_url.as_deref(),
            Some("https://cdn.example.com/ada.png")
        );
        assert_eq!(grant.message, "User logged in successfully");
    }

    #[tokio::test]
    async fn test_login_failure_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(ErrorResponse::new("Invalid password")),
            )
            .mount(&server)
            .await;

        let err = api(&server, Arc::new(InMemorySessionStore::new()))
            .login("ada", "nope")
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Invalid password");
    }

    #[tokio::test]
    async fn test_signup_sends_camel_case_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/signup"))
            .and(body_partial_json(json!({
                "username": "ada",
                "confirmPassword": "hunter22"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(auth_body()))
            .expect(1)
            .mount(&server)
            .await;

        let form = SignupForm {
            name: "Ada Lovelace".into(),
            username: " ada ".into(),
            mobile: "5550100".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        };
        let grant = api(&server, Arc::new(InMemorySessionStore::new()))
            .signup(&form)
            .await
            .unwrap();

        assert_eq!(grant.session.user.username, "ada");
    }

    #[tokio::test]
    async fn test_authenticate_uses_stored_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/authenticate"))
            .and(header("authorization", "Bearer jwt-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Arc::new(InMemorySessionStore::new());
        let grant = into_grant(serde_json::from_value(auth_body()).unwrap());
        session.save(grant.session).await.unwrap();

        api(&server, session).authenticate().await.unwrap();
    }

    #[tokio::test]
    async fn test_authenticate_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/authenticate"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(ErrorResponse::new("jwt expired")),
            )
            .mount(&server)
            .await;

        let session = Arc::new(InMemorySessionStore::new());
        let grant = into_grant(serde_json::from_value(auth_body()).unwrap());
        session.save(grant.session).await.unwrap();

        let err = api(&server, session).authenticate().await.unwrap_err();

        assert!(err.is_auth_failure());
    }
}
