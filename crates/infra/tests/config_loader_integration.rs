//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! wiring a client from it.

use recipebox_common::CredentialStore;
use recipebox_domain::{CredentialBackend, CredentialMode};
use recipebox_infra::{config, ClientContext};
use tempfile::TempDir;

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("recipebox.json");
    std::fs::write(
        &path,
        r#"{
            "api": {
                "base_url": "https://recipes.example.com",
                "timeout_secs": 15,
                "refresh_path": "/auth/refresh",
                "credential_mode": "cookie"
            },
            "credentials": {
                "backend": "file",
                "path": "/tmp/recipebox-session.json"
            },
            "logging": {
                "level": "recipebox_infra=debug",
                "json": true
            }
        }"#,
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from JSON file");

    assert_eq!(config.api.base_url, "https://recipes.example.com");
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.api.credential_mode, CredentialMode::Cookie);
    assert_eq!(config.credentials.backend, CredentialBackend::File);
    assert_eq!(config.credentials.path, "/tmp/recipebox-session.json");
    assert_eq!(config.logging.level, "recipebox_infra=debug");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_from_toml_file_with_missing_sections() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nbase_url = \"http://127.0.0.1:8000\"\n")
        .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from TOML file");

    assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.credential_mode, CredentialMode::Bearer);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_invalid_enum_value_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("recipebox.json");
    std::fs::write(&path, r#"{"api": {"credential_mode": "basic"}}"#)
        .expect("Failed to write config");

    assert!(config::load_from_file(Some(path)).is_err());
}

#[tokio::test]
async fn test_context_from_loaded_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session = dir.path().join("session.json");
    let path = dir.path().join("recipebox.toml");
    std::fs::write(
        &path,
        format!(
            concat!(
                "[api]\nbase_url = \"http://127.0.0.1:8000/\"\n\n",
                "[credentials]\nbackend = \"file\"\npath = {:?}\n",
            ),
            session.display().to_string()
        ),
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("config should load");
    let context = ClientContext::from_config(&config).expect("context should build");

    assert_eq!(context.gateway.base_url(), "http://127.0.0.1:8000");
    assert!(!context.auth.is_authenticated().await.expect("store readable"));

    context.gateway.credentials().store_token("t-1").await.expect("token stored");
    assert!(session.exists());
    assert!(context.auth.is_authenticated().await.expect("store readable"));
}
