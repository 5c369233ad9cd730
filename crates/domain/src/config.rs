//! Configuration management

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CREDENTIALS_FILE, DEFAULT_KEYCHAIN_SERVICE,
    DEFAULT_REFRESH_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::errors::RecipeBoxError;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-call timeout applied to every network request, refresh included
    pub timeout_secs: u64,
    pub refresh_path: String,
    pub credential_mode: CredentialMode,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            credential_mode: CredentialMode::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// How credentials travel with outgoing requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// Stored token is sent as `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// Session rides on cookies set by the server
    Cookie,
}

impl FromStr for CredentialMode {
    type Err = RecipeBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "cookie" | "cookies" => Ok(Self::Cookie),
            other => Err(RecipeBoxError::Config(format!("Unknown credential mode: {other}"))),
        }
    }
}

impl fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => f.write_str("bearer"),
            Self::Cookie => f.write_str("cookie"),
        }
    }
}

/// Where the session token is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    pub backend: CredentialBackend,
    /// File path for the `file` backend
    pub path: String,
    /// Keychain service name for the `keychain` backend
    pub service_name: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            backend: CredentialBackend::default(),
            path: DEFAULT_CREDENTIALS_FILE.to_string(),
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    Memory,
    #[default]
    File,
    Keychain,
}

impl FromStr for CredentialBackend {
    type Err = RecipeBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "keychain" => Ok(Self::Keychain),
            other => Err(RecipeBoxError::Config(format!("Unknown credential backend: {other}"))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "recipebox_infra=debug")
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_api_contract() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.refresh_path, "/auth/refresh");
        assert_eq!(config.api.credential_mode, CredentialMode::Bearer);
        assert_eq!(config.credentials.backend, CredentialBackend::File);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api":{"base_url":"https://api.example.com"}}"#).unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn credential_mode_parses_case_insensitively() {
        assert_eq!("Cookie".parse::<CredentialMode>().unwrap(), CredentialMode::Cookie);
        assert_eq!("BEARER".parse::<CredentialMode>().unwrap(), CredentialMode::Bearer);
        assert!(matches!("basic".parse::<CredentialMode>(), Err(RecipeBoxError::Config(_))));
    }

    #[test]
    fn credential_backend_parses() {
        assert_eq!("keychain".parse::<CredentialBackend>().unwrap(), CredentialBackend::Keychain);
        assert!("sqlite".parse::<CredentialBackend>().is_err());
    }
}
