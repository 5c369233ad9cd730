//! File-backed credential store
//!
//! Keeps a flat JSON object of string keys to string values, the same shape a
//! browser's local storage exposes. The session token lives under
//! [`TOKEN_STORAGE_KEY`]; other keys written by older clients are preserved.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use recipebox_domain::constants::TOKEN_STORAGE_KEY;
use tokio::sync::Mutex;
use tracing::debug;

use super::traits::{CredentialError, CredentialStore};

type Document = BTreeMap<String, String>;

/// JSON document on disk holding the session token
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, CredentialError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Document::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &Document) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, serialized).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load_token(&self) -> Result<Option<String>, CredentialError> {
        let document = self.read_document().await?;
        Ok(document.get(TOKEN_STORAGE_KEY).filter(|t| !t.is_empty()).cloned())
    }

    async fn store_token(&self, token: &str) -> Result<(), CredentialError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(TOKEN_STORAGE_KEY.to_string(), token.to_string());
        self.write_document(&document).await?;

        debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), CredentialError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        if document.remove(TOKEN_STORAGE_KEY).is_some() {
            self.write_document(&document).await?;
            debug!(path = %self.path.display(), "Session token cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_file_means_signed_out() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));

        assert_eq!(store.load_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn round_trips_token_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileCredentialStore::new(&path).store_token("t-1").await.unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.load_token().await.unwrap().as_deref(), Some("t-1"));

        reopened.clear_token().await.unwrap();
        assert_eq!(reopened.load_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn preserves_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"user":"{\"name\":\"chef\"}"}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        store.store_token("t-2").await.unwrap();
        store.clear_token().await.unwrap();

        let raw: Document = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.contains_key("user"));
        assert!(!raw.contains_key("token"));
    }

    #[tokio::test]
    async fn malformed_document_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileCredentialStore::new(&path).load_token().await.unwrap_err();
        assert!(matches!(err, CredentialError::Malformed(_)));
    }
}
