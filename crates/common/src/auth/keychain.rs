//! Platform keychain credential store
//!
//! Thin wrapper over the system keychain (macOS Keychain Access, Windows
//! Credential Manager, Linux Secret Service) through `keyring`. One entry per
//! `(service, account)` pair holds the session token.
//!
//! ```no_run
//! use recipebox_common::auth::{CredentialStore, KeychainCredentialStore};
//!
//! # async fn demo() -> Result<(), recipebox_common::CredentialError> {
//! let store = KeychainCredentialStore::new("RecipeBox.session", "main");
//! store.store_token("secret").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use keyring::Entry;
use recipebox_domain::constants::DEFAULT_KEYCHAIN_ACCOUNT;
use tracing::debug;

use super::traits::{CredentialError, CredentialStore};

/// Session token kept in the platform keychain
#[derive(Debug, Clone)]
pub struct KeychainCredentialStore {
    service_name: String,
    account: String,
}

impl KeychainCredentialStore {
    pub fn new(service_name: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), account: account.into() }
    }

    /// Store for the default account under `service_name`
    pub fn for_service(service_name: impl Into<String>) -> Self {
        Self::new(service_name, DEFAULT_KEYCHAIN_ACCOUNT)
    }

    /// Run a keychain operation on the blocking pool; the OS calls block.
    async fn with_entry<T, F>(&self, op: F) -> Result<T, CredentialError>
    where
        F: FnOnce(Entry) -> Result<T, CredentialError> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service_name.clone();
        let account = self.account.clone();

        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &account).map_err(|e| {
                CredentialError::Keychain(format!(
                    "Failed to open keychain entry for {service}: {e}"
                ))
            })?;
            op(entry)
        })
        .await
        .map_err(|e| CredentialError::Keychain(format!("Keychain task failed: {e}")))?
    }
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn load_token(&self) -> Result<Option<String>, CredentialError> {
        debug!(service = %self.service_name, account = %self.account, "Reading session token");

        self.with_entry(|entry| match entry.get_password() {
            Ok(token) => Ok(Some(token).filter(|t| !t.is_empty())),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialError::Keychain(format!("Failed to read token: {e}"))),
        })
        .await
    }

    async fn store_token(&self, token: &str) -> Result<(), CredentialError> {
        let token = token.to_owned();
        self.with_entry(move |entry| {
            entry
                .set_password(&token)
                .map_err(|e| CredentialError::Keychain(format!("Failed to store token: {e}")))
        })
        .await?;

        debug!(service = %self.service_name, account = %self.account, "Session token stored");
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), CredentialError> {
        self.with_entry(|entry| match entry.delete_credential() {
            // Already gone counts as cleared.
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialError::Keychain(format!("Failed to delete token: {e}"))),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use keyring::credential::CredentialBuilderApi;
    use keyring::mock::MockCredentialBuilder;

    use super::*;

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    #[test]
    fn default_backend_is_not_the_mock_store() {
        let builder = keyring::default::default_credential_builder();
        assert!(
            builder.as_any().downcast_ref::<MockCredentialBuilder>().is_none(),
            "keyring is built without a platform keychain backend"
        );
    }

    #[tokio::test]
    async fn operations_run_through_blocking_pool() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        let store = KeychainCredentialStore::new("RecipeBox.test", "blocking");

        store.store_token("t-1").await.unwrap();
        assert!(store.clear_token().await.is_ok());
        assert_eq!(store.load_token().await.unwrap(), None);
    }

    #[test]
    fn for_service_uses_default_account() {
        let store = KeychainCredentialStore::for_service("RecipeBox.test");
        assert_eq!(store.service_name, "RecipeBox.test");
        assert_eq!(store.account, DEFAULT_KEYCHAIN_ACCOUNT);
    }
}
