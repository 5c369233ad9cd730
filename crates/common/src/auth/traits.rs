//! Trait for session credential persistence
//!
//! Abstracts where the session token lives so the gateway can be tested with
//! an in-memory store and shipped with a file or keychain backend.

use async_trait::async_trait;
use recipebox_domain::RecipeBoxError;
use thiserror::Error;

/// Credential storage errors
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential storage I/O failed: {0}")]
    Io(String),

    #[error("Credential document is malformed: {0}")]
    Malformed(String),

    #[error("Keychain operation failed: {0}")]
    Keychain(String),
}

impl From<std::io::Error> for CredentialError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<CredentialError> for RecipeBoxError {
    fn from(err: CredentialError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Persistence surface for the session token
///
/// Implementations must never log token values.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current session token, `None` when signed out
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    async fn load_token(&self) -> Result<Option<String>, CredentialError>;

    /// Replace the session token
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    async fn store_token(&self, token: &str) -> Result<(), CredentialError>;

    /// Forget the session token (idempotent)
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    async fn clear_token(&self) -> Result<(), CredentialError>;
}
