//! Sign-in, registration and sign-out
//!
//! Session tokens returned by the server are persisted through the gateway's
//! credential store so every later request picks them up.

use std::sync::Arc;

use recipebox_common::CredentialStore;
use recipebox_domain::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::{debug, info, instrument};

use crate::gateway::{GatewayError, RequestGateway, RequestSpec};

/// Authentication endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: Arc<RequestGateway>,
}

impl AuthApi {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for rejected credentials; the refresh protocol
    /// is not attempted for this call.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, GatewayError> {
        let spec = RequestSpec::post("/login").json(request)?.skip_refresh();
        let response = self.start_session(spec).await?;
        info!("signed in");
        Ok(response)
    }

    /// Create an account; signs in when the server hands back a token
    ///
    /// # Errors
    ///
    /// Returns `ServerError` with the server's message when registration is
    /// refused (e.g. email already taken).
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, GatewayError> {
        let spec = RequestSpec::post("/register").json(request)?.skip_refresh();
        let response = self.start_session(spec).await?;
        info!("registered");
        Ok(response)
    }

    /// Forget the stored session token. Local only.
    ///
    /// # Errors
    ///
    /// Returns `Credentials` if the store cannot be updated
    pub async fn logout(&self) -> Result<(), GatewayError> {
        self.gateway.credentials().clear_token().await?;
        info!("signed out");
        Ok(())
    }

    /// Whether a session token is currently stored
    ///
    /// # Errors
    ///
    /// Returns `Credentials` if the store cannot be read
    pub async fn is_authenticated(&self) -> Result<bool, GatewayError> {
        Ok(self.gateway.credentials().load_token().await?.is_some())
    }

    async fn start_session(&self, spec: RequestSpec) -> Result<AuthResponse, GatewayError> {
        let response: AuthResponse = self.gateway.send(spec).await?.json()?;

        if let Some(token) = response.session_token() {
            self.gateway.credentials().store_token(token).await?;
        } else {
            debug!("no token in auth response; relying on session cookie");
        }

        Ok(response)
    }
}
