//! Session persisted as a JSON file, the terminal counterpart of browser
//! local storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use nook_core::domain::{Session, User};
use nook_core::ports::{SessionError, SessionStore};

/// File-backed session store. The file is read once on open and rewritten on
/// every save; reads are served from memory.
pub struct FileSessionStore {
    path: PathBuf,
    session: RwLock<Option<Session>>,
}

impl FileSessionStore {
    /// Open the store at `path`. A missing file means no session; an
    /// unreadable one is logged and ignored.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let session = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };

        tracing::debug!(path = %path.display(), signed_in = session.is_some(), "Session store opened");

        Ok(Self {
            path,
            session: RwLock::new(session),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }

    async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    async fn save(&self, session: Session) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec_pretty(&session)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        // Hold the write lock across the file write so concurrent saves land in order.
        let mut current = self.session.write().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        *current = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.session.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        }
        *current = None;
        Ok(())
    }
}
