//! Session credential storage
//!
//! The request gateway reads the session token from a [`CredentialStore`]
//! before every dispatch; login, logout and a successful refresh write it.
//! Backends:
//!
//! - [`MemoryCredentialStore`]: process-local, used by tests and short-lived
//!   sessions
//! - [`FileCredentialStore`]: JSON key/value document on disk, the desktop
//!   analogue of browser local storage
//! - `KeychainCredentialStore`: platform keychain (`platform` feature)

pub mod file;
#[cfg(feature = "platform")]
pub mod keychain;
pub mod memory;
pub mod traits;

pub use file::FileCredentialStore;
#[cfg(feature = "platform")]
pub use keychain::KeychainCredentialStore;
pub use memory::MemoryCredentialStore;
pub use traits::{CredentialError, CredentialStore};
