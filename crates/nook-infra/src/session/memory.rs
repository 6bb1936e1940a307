//! In-memory session store - used in tests and for throwaway sessions.

use async_trait::async_trait;
use tokio::sync::RwLock;

use nook_core::domain::{Session, User};
use nook_core::ports::{SessionError, SessionStore};

/// Session kept behind an async RwLock. Lost on process exit.
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }

    async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    async fn save(&self, session: Session) -> Result<(), SessionError> {
        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok".into(),
            user: User {
                id: "u1".into(),
                name: "Ada".into(),
                username: "ada".into(),
                avatar_url: None,
                bio: None,
            },
        }
    }

    #[tokio::test]
    async fn test_save_and_read() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.token().await, None);

        store.save(session()).await.unwrap();

        assert_eq!(store.token().await.as_deref(), Some("tok"));
        assert_eq!(store.current_user().await.unwrap().username, "ada");
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemorySessionStore::with_session(session());
        store.clear().await.unwrap();
        assert!(store.current_user().await.is_none());
    }
}
