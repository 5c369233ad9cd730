//! Conversions from external infrastructure errors into domain errors.

use recipebox_domain::RecipeBoxError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RecipeBoxError);

impl From<InfraError> for RecipeBoxError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RecipeBoxError> for InfraError {
    fn from(value: RecipeBoxError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRecipeBoxError {
    fn into_recipebox(self) -> RecipeBoxError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RecipeBoxError */
/* -------------------------------------------------------------------------- */

impl IntoRecipeBoxError for HttpError {
    fn into_recipebox(self) -> RecipeBoxError {
        let url = self.url().map(ToString::to_string).unwrap_or_else(|| "<unknown url>".into());

        if self.is_timeout() {
            RecipeBoxError::Network(format!("http request to {url} timed out"))
        } else if self.is_connect() {
            RecipeBoxError::Network(format!("http connection to {url} failed: {self}"))
        } else if self.is_builder() {
            RecipeBoxError::InvalidInput(format!("invalid http request: {self}"))
        } else if self.is_decode() {
            RecipeBoxError::Server(format!("undecodable http response from {url}: {self}"))
        } else {
            RecipeBoxError::Network(format!("http request to {url} failed: {self}"))
        }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_recipebox())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → RecipeBoxError */
/* -------------------------------------------------------------------------- */

impl IntoRecipeBoxError for std::io::Error {
    fn into_recipebox(self) -> RecipeBoxError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => RecipeBoxError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                RecipeBoxError::Storage(format!("permission denied: {self}"))
            }
            _ => RecipeBoxError::Storage(self.to_string()),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_recipebox())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → RecipeBoxError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(RecipeBoxError::Config(format!("Invalid JSON format: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(RecipeBoxError::Config(format!("Invalid TOML format: {value}")))
    }
}
