//! Wiring for a ready-to-use client

use std::sync::Arc;

use recipebox_domain::Config;

use crate::api::{AuthApi, ProfileApi, RecipeApi};
use crate::credentials::build_credential_store;
use crate::gateway::{GatewayError, RequestGateway};

/// One gateway shared by every API surface, so they also share one refresh
/// cycle and one cookie jar.
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub gateway: Arc<RequestGateway>,
    pub auth: AuthApi,
    pub recipes: RecipeApi,
    pub profile: ProfileApi,
}

impl ClientContext {
    /// Build the credential store and gateway described by `config`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let credentials = build_credential_store(&config.credentials);
        let gateway = Arc::new(RequestGateway::new(&config.api, credentials)?);
        Ok(Self::with_gateway(gateway))
    }

    pub fn with_gateway(gateway: Arc<RequestGateway>) -> Self {
        Self {
            auth: AuthApi::new(Arc::clone(&gateway)),
            recipes: RecipeApi::new(Arc::clone(&gateway)),
            profile: ProfileApi::new(Arc::clone(&gateway)),
            gateway,
        }
    }
}
