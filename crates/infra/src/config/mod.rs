//! Configuration loading
//!
//! Builds a [`recipebox_domain::Config`] from environment variables, a config
//! file, or defaults.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
