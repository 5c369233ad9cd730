//! Integration tests for credential stores
//!
//! Exercises the backends through `Arc<dyn CredentialStore>`, the way the
//! request gateway holds them.

use std::sync::Arc;

use recipebox_common::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use tempfile::TempDir;

async fn sign_in_and_out(store: Arc<dyn CredentialStore>) {
    assert_eq!(store.load_token().await.unwrap(), None);

    store.store_token("first").await.unwrap();
    store.store_token("second").await.unwrap();
    assert_eq!(store.load_token().await.unwrap().as_deref(), Some("second"));

    store.clear_token().await.unwrap();
    store.clear_token().await.unwrap();
    assert_eq!(store.load_token().await.unwrap(), None);
}

#[tokio::test]
async fn memory_store_session_lifecycle() {
    sign_in_and_out(Arc::new(MemoryCredentialStore::new())).await;
}

#[tokio::test]
async fn file_store_session_lifecycle() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    sign_in_and_out(Arc::new(FileCredentialStore::new(dir.path().join("session.json")))).await;
}

#[tokio::test]
async fn file_store_token_survives_new_instance() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("session.json");

    FileCredentialStore::new(&path).store_token("persisted").await.unwrap();

    let reopened: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(&path));
    assert_eq!(reopened.load_token().await.unwrap().as_deref(), Some("persisted"));
}
