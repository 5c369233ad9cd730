//! Credential store selection

use std::sync::Arc;

use recipebox_common::{
    CredentialStore, FileCredentialStore, KeychainCredentialStore, MemoryCredentialStore,
};
use recipebox_domain::{CredentialBackend, CredentialConfig};
use tracing::debug;

/// Build the credential store named by `config.backend`
pub fn build_credential_store(config: &CredentialConfig) -> Arc<dyn CredentialStore> {
    debug!(backend = ?config.backend, "initialising credential store");

    match config.backend {
        CredentialBackend::Memory => Arc::new(MemoryCredentialStore::new()),
        CredentialBackend::File => Arc::new(FileCredentialStore::new(&config.path)),
        CredentialBackend::Keychain => {
            Arc::new(KeychainCredentialStore::for_service(&config.service_name))
        }
    }
}
