//! In-memory credential store

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::{CredentialError, CredentialStore};

/// Process-local token holder
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load_token(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.token.read().await.clone())
    }

    async fn store_token(&self, token: &str) -> Result<(), CredentialError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), CredentialError> {
        *self.token.write().await = None;
        Ok(())
    }
}
