//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If an API URL is set in the environment, configuration comes from
//!    environment variables (unset optional variables keep their defaults)
//! 2. Otherwise the first config file found by [`probe_config_paths`] is used
//! 3. With neither, built-in defaults apply
//!
//! ## Environment Variables
//! - `RECIPEBOX_API_URL`: API base URL (`NEXT_PUBLIC_API_URL` is accepted too)
//! - `RECIPEBOX_API_TIMEOUT_SECS`: Per-call timeout in seconds
//! - `RECIPEBOX_REFRESH_PATH`: Session refresh endpoint path
//! - `RECIPEBOX_CREDENTIAL_MODE`: `bearer` or `cookie`
//! - `RECIPEBOX_CREDENTIAL_BACKEND`: `memory`, `file` or `keychain`
//! - `RECIPEBOX_CREDENTIAL_PATH`: Session file for the `file` backend
//! - `RECIPEBOX_LOG_LEVEL`: Log filter used when `RUST_LOG` is unset
//! - `RECIPEBOX_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./recipebox.json` or `./recipebox.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the user's config directory (`$XDG_CONFIG_HOME/recipebox`
//!    or `~/.config/recipebox`)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use recipebox_domain::{Config, RecipeBoxError, Result};

/// Primary API URL variable
pub const API_URL_ENV: &str = "RECIPEBOX_API_URL";
/// Alias kept for environments configured for the web client
pub const API_URL_ENV_ALIAS: &str = "NEXT_PUBLIC_API_URL";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["recipebox.json", "recipebox.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `RecipeBoxError::Config` if:
/// - An environment variable holds an invalid value
/// - A config file exists but cannot be read or parsed
pub fn load() -> Result<Config> {
    if api_url_from_env().is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No configuration found; using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// The API URL is required; every other variable is optional.
///
/// # Errors
/// Returns `RecipeBoxError::Config` if the API URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = api_url_from_env().ok_or_else(|| {
        RecipeBoxError::Config(format!("Missing required environment variable: {API_URL_ENV}"))
    })?;

    let mut config = Config::default();
    config.api.base_url = base_url;

    if let Some(timeout) = optional_env("RECIPEBOX_API_TIMEOUT_SECS") {
        config.api.timeout_secs = parse_env("RECIPEBOX_API_TIMEOUT_SECS", &timeout)?;
        if config.api.timeout_secs == 0 {
            return Err(RecipeBoxError::Config("Timeout must be at least one second".into()));
        }
    }
    if let Some(path) = optional_env("RECIPEBOX_REFRESH_PATH") {
        config.api.refresh_path = path;
    }
    if let Some(mode) = optional_env("RECIPEBOX_CREDENTIAL_MODE") {
        config.api.credential_mode = mode.parse()?;
    }
    if let Some(backend) = optional_env("RECIPEBOX_CREDENTIAL_BACKEND") {
        config.credentials.backend = backend.parse()?;
    }
    if let Some(path) = optional_env("RECIPEBOX_CREDENTIAL_PATH") {
        config.credentials.path = path;
    }
    if let Some(level) = optional_env("RECIPEBOX_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("RECIPEBOX_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
/// Sections and fields missing from the file keep their defaults.
///
/// # Errors
/// Returns `RecipeBoxError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RecipeBoxError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RecipeBoxError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RecipeBoxError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RecipeBoxError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RecipeBoxError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RecipeBoxError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(config_dir) = user_config_dir() {
        dirs.push(config_dir.join("recipebox"));
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn user_config_dir() -> Option<PathBuf> {
    optional_env("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| optional_env("HOME").map(|home| PathBuf::from(home).join(".config")))
}

fn api_url_from_env() -> Option<String> {
    optional_env(API_URL_ENV).or_else(|| optional_env(API_URL_ENV_ALIAS))
}

/// Non-empty environment variable
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| RecipeBoxError::Config(format!("Invalid value for {key}: {e}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
