use std::sync::Arc;

use crate::domain::{SignupForm, User};
use crate::error::{ApiError, DomainError};
use crate::ports::{AuthApi, AuthGrant, Notification, Notifier, SessionStore};

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please login again.";

/// Sign-up, login and session checks. The only writer of the session store.
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn AuthApi>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    /// Create an account and keep the resulting session.
    pub async fn signup(&self, form: SignupForm) -> Result<User, DomainError> {
        form.validate()?;
        let result = self.api.signup(&form).await;
        self.finish(result, "Signed up").await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Username and password are required".to_string(),
            ));
        }
        let result = self.api.login(username.trim(), password).await;
        self.finish(result, "Logged in").await
    }

    async fn finish(
        &self,
        result: Result<AuthGrant, ApiError>,
        fallback: &str,
    ) -> Result<User, DomainError> {
        let grant = match result {
            Ok(grant) => grant,
            Err(err) => {
                tracing::warn!(error = %err, "Authentication request failed");
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(err.user_message()));
                return Err(err);
            }
        };

        let user = grant.session.user.clone();
        self.session.save(grant.session).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "Session stored");

        let message = if grant.message.is_empty() {
            fallback.to_string()
        } else {
            grant.message
        };
        self.notifier.notify(Notification::success(message));
        Ok(user)
    }

    /// Check the stored token with the server.
    ///
    /// Returns `false` when there is no session or the server no longer
    /// accepts it; in the latter case the stale session is dropped. Any other
    /// failure is notified and returned.
    pub async fn authenticate(&self) -> Result<bool, DomainError> {
        if self.session.token().await.is_none() {
            return Ok(false);
        }

        match self.api.authenticate().await {
            Ok(()) => Ok(true),
            Err(err) if err.is_auth_failure() => {
                tracing::info!(error = %err, "Stored session rejected");
                self.session.clear().await?;
                self.notifier
                    .notify(Notification::error(SESSION_EXPIRED_MESSAGE));
                Ok(false)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Session check failed");
                let err = DomainError::from(err);
                self.notifier.notify(Notification::error(format!(
                    "Could not verify session: {}",
                    err.user_message()
                )));
                Err(err)
            }
        }
    }

    pub async fn logout(&self) -> Result<(), DomainError> {
        self.session.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuthApi, FakeSession, RecordingNotifier, user};

    fn service(
        api: FakeAuthApi,
        session: FakeSession,
    ) -> (AuthService, Arc<FakeAuthApi>, Arc<FakeSession>, Arc<RecordingNotifier>) {
        let api = Arc::new(api);
        let session = Arc::new(session);
        let notifier = Arc::new(RecordingNotifier::default());
        let service = AuthService::new(api.clone(), session.clone(), notifier.clone());
        (service, api, session, notifier)
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let (auth, _, session, notifier) = service(
            FakeAuthApi::granting("tok-1", user("ada"), "Login successful"),
            FakeSession::anonymous(),
        );

        let logged_in = auth.login("ada", "hunter22").await.unwrap();

        assert_eq!(logged_in.id, "ada");
        assert_eq!(session.snapshot().unwrap().token, "tok-1");
        assert_eq!(notifier.successes(), vec!["Login successful".to_string()]);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_session_empty() {
        let (auth, _, session, notifier) =
            service(FakeAuthApi::default(), FakeSession::anonymous());

        let result = auth.login("ada", "wrong").await;

        assert!(matches!(
            result,
            Err(DomainError::Api(ApiError::Unauthorized(_)))
        ));
        assert!(session.snapshot().is_none());
        assert_eq!(notifier.errors(), vec!["Invalid credentials".to_string()]);
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let (auth, api, _, _) = service(FakeAuthApi::default(), FakeSession::anonymous());

        assert!(matches!(
            auth.login(" ", "x").await,
            Err(DomainError::Validation(_))
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_validates_before_calling_api() {
        let (auth, api, _, _) = service(
            FakeAuthApi::granting("tok", user("ada"), ""),
            FakeSession::anonymous(),
        );

        let form = SignupForm {
            name: "Ada".into(),
            username: "ada".into(),
            mobile: "555".into(),
            password: "one".into(),
            confirm_password: "two".into(),
        };

        assert!(matches!(
            auth.signup(form).await,
            Err(DomainError::Validation(_))
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_uses_fallback_message() {
        let (auth, _, session, notifier) = service(
            FakeAuthApi::granting("tok", user("ada"), ""),
            FakeSession::anonymous(),
        );

        let form = SignupForm {
            name: "Ada".into(),
            username: "ada".into(),
            mobile: "555".into(),
            password: "same".into(),
            confirm_password: "same".into(),
        };
        auth.signup(form).await.unwrap();

        assert!(session.snapshot().is_some());
        assert_eq!(notifier.successes(), vec!["Signed up".to_string()]);
    }

    #[tokio::test]
    async fn test_authenticate_without_token_skips_api() {
        let (auth, api, _, _) = service(FakeAuthApi::default(), FakeSession::anonymous());

        assert!(!auth.authenticate().await.unwrap());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_token_clears_session() {
        let api = FakeAuthApi::default();
        *api.authenticate_result.lock().unwrap() =
            Some(Err(ApiError::Unauthorized("jwt expired".into())));
        let (auth, _, session, notifier) = service(api, FakeSession::signed_in("ada"));

        assert!(!auth.authenticate().await.unwrap());
        assert!(session.snapshot().is_none());
        assert_eq!(notifier.errors(), vec![SESSION_EXPIRED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_network_error_keeps_session() {
        let api = FakeAuthApi::default();
        *api.authenticate_result.lock().unwrap() = Some(Err(ApiError::Timeout));
        let (auth, _, session, notifier) = service(api, FakeSession::signed_in("ada"));

        assert!(matches!(
            auth.authenticate().await,
            Err(DomainError::Api(ApiError::Timeout))
        ));
        assert!(session.snapshot().is_some());
        assert_eq!(
            notifier.errors(),
            vec!["Could not verify session: Request timed out".to_string()]
        );
    }

    #[tokio::test]
    async fn test_valid_token() {
        let (auth, api, _, _) = service(FakeAuthApi::default(), FakeSession::signed_in("ada"));

        assert!(auth.authenticate().await.unwrap());
        assert_eq!(api.calls(), vec!["authenticate"]);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (auth, _, session, _) =
            service(FakeAuthApi::default(), FakeSession::signed_in("ada"));

        auth.logout().await.unwrap();

        assert!(session.snapshot().is_none());
    }
}
