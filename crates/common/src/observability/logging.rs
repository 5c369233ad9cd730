//! Tracing subscriber installation

use std::sync::OnceLock;

use recipebox_domain::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter: `RUST_LOG` wins, the configured level is the fallback.
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| ObservabilityError::InvalidFilter {
        directive: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global fmt subscriber (stderr, optional JSON).
///
/// Calling it again after a successful install is a no-op.
///
/// # Errors
/// Returns error if the filter directive is invalid or another global
/// subscriber was installed by someone else.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json { builder.json().try_init() } else { builder.try_init() };
    result.map_err(|e| ObservabilityError::Install(e.to_string()))?;

    let _ = INSTALLED.set(());
    tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
    Ok(())
}
