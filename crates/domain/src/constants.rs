//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";
pub const DEFAULT_USER_AGENT: &str = concat!("recipebox/", env!("CARGO_PKG_VERSION"));

// Credential storage
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const DEFAULT_CREDENTIALS_FILE: &str = "recipebox-session.json";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "RecipeBox.session";
pub const DEFAULT_KEYCHAIN_ACCOUNT: &str = "main";

// Dashboard listing
pub const RECIPES_PER_PAGE: usize = 9; // 3 per row x 3 rows
