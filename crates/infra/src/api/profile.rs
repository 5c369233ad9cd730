//! Profile endpoints

use std::sync::Arc;

use recipebox_domain::{ProfileUpdate, UserProfile};
use tracing::{info, instrument};

use super::envelope::UserEnvelope;
use crate::gateway::{GatewayError, RequestGateway, RequestSpec};

#[derive(Debug, Clone)]
pub struct ProfileApi {
    gateway: Arc<RequestGateway>,
}

impl ProfileApi {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Signed-in user's profile
    ///
    /// # Errors
    ///
    /// Propagates gateway errors
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile, GatewayError> {
        let envelope: UserEnvelope = self.gateway.send(RequestSpec::get("/profile")).await?.json()?;
        Ok(envelope.into_user())
    }

    /// Change name and/or email; unset fields are left alone server-side
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when the update sets nothing
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, GatewayError> {
        if update.name.is_none() && update.email.is_none() {
            return Err(GatewayError::InvalidRequest("profile update is empty".to_string()));
        }

        let spec = RequestSpec::put("/profile").json(update)?;
        let envelope: UserEnvelope = self.gateway.send(spec).await?.json()?;
        info!("profile updated");
        Ok(envelope.into_user())
    }
}
