//! Gateway error taxonomy
//!
//! Callers only ever see the final classification of a request; the
//! intermediate refresh-and-replay steps are invisible to them.

use recipebox_domain::RecipeBoxError;
use recipebox_common::CredentialError;
use thiserror::Error;

/// Categories of gateway errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCategory {
    /// Transport failures (timeout, DNS, connection reset)
    Network,
    /// Session is gone and could not be recovered; the user must sign in again
    Authentication,
    /// Non-2xx responses other than 401
    Server,
    /// Problems with the request itself or local state
    Client,
}

/// Errors returned by [`super::RequestGateway::send`]
///
/// `Clone` so a single refresh failure can be fanned out to every request
/// queued behind it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Session refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Credential storage error: {0}")]
    Credentials(String),

    #[error("Request abandoned before its refresh cycle settled")]
    Cancelled,
}

impl GatewayError {
    /// Get the error category for this error
    pub fn category(&self) -> GatewayErrorCategory {
        match self {
            Self::NetworkFailure(_) => GatewayErrorCategory::Network,
            Self::Unauthorized { .. } | Self::RefreshFailed(_) => {
                GatewayErrorCategory::Authentication
            }
            Self::ServerError { .. } | Self::InvalidResponse(_) => GatewayErrorCategory::Server,
            Self::InvalidRequest(_) | Self::Credentials(_) | Self::Cancelled => {
                GatewayErrorCategory::Client
            }
        }
    }

    /// True when the caller has to re-authenticate (e.g. show the login form)
    pub fn requires_login(&self) -> bool {
        self.category() == GatewayErrorCategory::Authentication
    }

    /// HTTP status carried by the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}

impl From<RecipeBoxError> for GatewayError {
    fn from(err: RecipeBoxError) -> Self {
        match err {
            RecipeBoxError::Network(message) => Self::NetworkFailure(message),
            RecipeBoxError::Auth(message) => Self::Unauthorized { message },
            RecipeBoxError::Storage(message) => Self::Credentials(message),
            RecipeBoxError::Server(message) => Self::InvalidResponse(message),
            RecipeBoxError::Config(message)
            | RecipeBoxError::InvalidInput(message)
            | RecipeBoxError::NotFound(message)
            | RecipeBoxError::Internal(message) => Self::InvalidRequest(message),
        }
    }
}

impl From<CredentialError> for GatewayError {
    fn from(err: CredentialError) -> Self {
        Self::Credentials(err.to_string())
    }
}

impl From<GatewayError> for RecipeBoxError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NetworkFailure(message) => Self::Network(message),
            GatewayError::Unauthorized { .. } | GatewayError::RefreshFailed(_) => {
                Self::Auth(err.to_string())
            }
            GatewayError::ServerError { status: 404, message } => Self::NotFound(message),
            GatewayError::ServerError { .. } | GatewayError::InvalidResponse(_) => {
                Self::Server(err.to_string())
            }
            GatewayError::InvalidRequest(message) => Self::InvalidInput(message),
            GatewayError::Credentials(message) => Self::Storage(message),
            GatewayError::Cancelled => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            GatewayError::NetworkFailure("reset".into()).category(),
            GatewayErrorCategory::Network
        );
        assert_eq!(
            GatewayError::RefreshFailed("500".into()).category(),
            GatewayErrorCategory::Authentication
        );
        assert_eq!(
            GatewayError::ServerError { status: 500, message: "boom".into() }.category(),
            GatewayErrorCategory::Server
        );
        assert_eq!(GatewayError::Cancelled.category(), GatewayErrorCategory::Client);
    }

    #[test]
    fn test_requires_login() {
        assert!(GatewayError::Unauthorized { message: "expired".into() }.requires_login());
        assert!(GatewayError::RefreshFailed("down".into()).requires_login());
        assert!(!GatewayError::NetworkFailure("down".into()).requires_login());
    }

    #[test]
    fn test_domain_conversion() {
        let not_found: RecipeBoxError =
            GatewayError::ServerError { status: 404, message: "no such recipe".into() }.into();
        assert_eq!(not_found, RecipeBoxError::NotFound("no such recipe".into()));

        let network: GatewayError = RecipeBoxError::Network("timed out".into()).into();
        assert_eq!(network, GatewayError::NetworkFailure("timed out".into()));
    }
}
