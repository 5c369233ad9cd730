//! Modular common utilities shared across RecipeBox crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `observability`: tracing subscriber installation (on by default)
//! - `platform`: platform integrations (system keychain credential storage)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

#[cfg(feature = "observability")]
pub mod observability;

// Re-export commonly used types and traits for convenience
pub use auth::{CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore};
#[cfg(feature = "platform")]
pub use auth::KeychainCredentialStore;
