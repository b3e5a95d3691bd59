//! Client-side key/value storage for the access token.

use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::{fs, sync::RwLock};

/// Key the access token is stored under.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file error")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON")]
    Format(#[from] serde_json::Error),
}

#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Stores entries as a JSON object in a single file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>, SessionError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileTokenStorage::new(&path);
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        storage.set(TOKEN_KEY, "abc").await.unwrap();

        let reopened = FileTokenStorage::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        reopened.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = FileTokenStorage::new(&path).get(TOKEN_KEY).await.unwrap_err();
        assert!(matches!(err, SessionError::Format(_)));
    }
}
