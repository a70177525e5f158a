//! Key-value persistence for [`InterviewSession`] records.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::session::InterviewSession;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("invalid session key '{0}'")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt session record: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Survives restarts; cleared only by an explicit [`SessionStore::clear`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<InterviewSession>, SessionStoreError>;
    async fn save(&self, key: &str, session: &InterviewSession) -> Result<(), SessionStoreError>;
    async fn clear(&self, key: &str) -> Result<(), SessionStoreError>;
}

/// One pretty-printed JSON file per key under `dir`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SessionStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SessionStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<InterviewSession>, SessionStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, session: &InterviewSession) -> Result<(), SessionStoreError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write-then-rename so a crash never leaves a half-written record.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(session)?).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(key, turns = session.chat_history.len(), "Session saved");
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), SessionStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
