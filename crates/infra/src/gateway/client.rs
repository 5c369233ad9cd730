//! Request gateway with single-flight session refresh
//!
//! Every outgoing call goes through [`RequestGateway::send`]. A 401 on a
//! request that has not been retried yet starts (or joins) a refresh cycle;
//! once the cycle settles the request is replayed exactly once or rejected
//! with the refresh failure.

use std::sync::Arc;
use std::time::Duration;

use futures::future::{join, join_all};
use parking_lot::Mutex;
use recipebox_common::CredentialStore;
use recipebox_domain::{ApiConfig, CredentialMode, RecipeBoxError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::errors::GatewayError;
use super::refresh::{Admission, PendingRequest, RefreshCycle, RefreshState, Reply};
use super::request::{GatewayResponse, RequestBody, RequestSpec};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Token fields the refresh endpoint may hand back
#[derive(Debug, Default, Deserialize)]
struct RefreshPayload {
    #[serde(default, rename = "accessToken")]
    access_token_camel: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl RefreshPayload {
    fn into_token(self) -> Option<String> {
        self.access_token_camel
            .or(self.access_token)
            .or(self.token)
            .filter(|t| !t.is_empty())
    }
}

/// HTTP front door for every API call
pub struct RequestGateway {
    http: HttpClient,
    base_url: String,
    refresh_url: String,
    mode: CredentialMode,
    credentials: Arc<dyn CredentialStore>,
    state: Arc<Mutex<RefreshState>>,
}

impl std::fmt::Debug for RequestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGateway")
            .field("base_url", &self.base_url)
            .field("refresh_url", &self.refresh_url)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl RequestGateway {
    /// Create a gateway from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, GatewayError> {
        Self::builder()
            .base_url(&config.base_url)
            .refresh_path(&config.refresh_path)
            .timeout(Duration::from_secs(config.timeout_secs))
            .credential_mode(config.credential_mode)
            .user_agent(&config.user_agent)
            .credentials(credentials)
            .build()
    }

    pub fn builder() -> RequestGatewayBuilder {
        RequestGatewayBuilder::default()
    }

    /// Credential store backing this gateway
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a refresh call is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().is_refreshing()
    }

    /// Number of requests parked behind the in-flight refresh
    pub fn queued_requests(&self) -> usize {
        self.state.lock().queued()
    }

    /// Issue a request, recovering once from an expired session.
    ///
    /// # Errors
    ///
    /// - `NetworkFailure` for transport errors (never triggers a refresh)
    /// - `Unauthorized` when the request was already retried or opted out
    /// - `RefreshFailed` when the refresh cycle this request joined failed
    /// - `ServerError` for any other non-2xx status
    #[instrument(skip(self, spec), fields(method = %spec.method, path = %spec.path))]
    pub async fn send(&self, spec: RequestSpec) -> Result<GatewayResponse, GatewayError> {
        let response = self.dispatch(&spec).await?;

        if response.status() == StatusCode::UNAUTHORIZED && !spec.already_retried {
            debug!("session rejected; entering refresh cycle");
            return self.recover(spec).await;
        }

        Self::classify(response)
    }

    async fn recover(&self, mut spec: RequestSpec) -> Reply {
        spec.already_retried = true;

        let admission = self.state.lock().admit(spec);
        let spec = match admission {
            Admission::Queued(receiver) => {
                return receiver.await.unwrap_or(Err(GatewayError::Cancelled));
            }
            Admission::Leader(spec) => spec,
        };

        let cycle = RefreshCycle::open(Arc::clone(&self.state));
        let outcome = self.refresh_session().await;
        let queued = cycle.settle();

        match outcome {
            Ok(()) => self.replay_all(spec, queued).await,
            Err(error) => {
                debug!(rejected = queued.len(), "failing requests queued behind refresh");
                for pending in queued {
                    pending.reject(error.clone());
                }
                Err(error)
            }
        }
    }

    /// Call the refresh endpoint once.
    ///
    /// Any non-2xx answer (401 included) or transport failure is reported as
    /// `RefreshFailed`. A token in the response body replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::RefreshFailed` when the session could not be
    /// re-established.
    #[instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<(), GatewayError> {
        info!(url = %self.refresh_url, "refreshing session");

        let builder =
            self.http.request(Method::POST, &self.refresh_url).json(&serde_json::json!({}));

        let response = self.http.send(builder).await.map_err(|err| {
            warn!(error = %err, "session refresh request failed");
            GatewayError::RefreshFailed(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "session refresh rejected");
            return Err(GatewayError::RefreshFailed(format!(
                "refresh endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(|err| {
            warn!(error = %err, "failed to read session refresh response");
            GatewayError::RefreshFailed(format!("failed to read refresh response: {err}"))
        })?;

        let token = serde_json::from_slice::<RefreshPayload>(&body)
            .ok()
            .and_then(RefreshPayload::into_token);

        if let Some(token) = token {
            self.credentials.store_token(&token).await.map_err(|err| {
                warn!(error = %err, "failed to persist refreshed token");
                GatewayError::RefreshFailed(format!("failed to store refreshed token: {err}"))
            })?;
        }

        info!("session refreshed");
        Ok(())
    }

    /// Replay the leader's request, then the queued ones in arrival order.
    async fn replay_all(&self, own: RequestSpec, queued: Vec<PendingRequest>) -> Reply {
        let waiting = queued.into_iter().filter(|p| !p.is_abandoned()).map(|pending| async move {
            let outcome = self.replay(&pending.spec).await;
            pending.resolve(outcome);
        });

        let (outcome, _) = join(self.replay(&own), join_all(waiting)).await;
        outcome
    }

    /// Second and final attempt; a 401 here is terminal.
    async fn replay(&self, spec: &RequestSpec) -> Reply {
        debug!(method = %spec.method, path = %spec.path, "replaying request");
        let response = self.dispatch(spec).await?;
        Self::classify(response)
    }

    async fn dispatch(&self, spec: &RequestSpec) -> Result<GatewayResponse, GatewayError> {
        let mut builder = self
            .http
            .request(spec.method.clone(), self.url_for(&spec.path))
            .headers(spec.headers.clone());

        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }

        if let Some(authorization) = self.authorization().await? {
            builder = builder.headers(authorization);
        }

        builder = match &spec.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(RequestBody::to_form(parts)?),
        };

        let response = self.http.send(builder).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|err| {
            let infra: InfraError = err.into();
            GatewayError::from(RecipeBoxError::from(infra))
        })?;

        Ok(GatewayResponse::new(status, headers, body))
    }

    /// Bearer header for the currently stored token, if any
    async fn authorization(&self) -> Result<Option<HeaderMap>, GatewayError> {
        if self.mode != CredentialMode::Bearer {
            return Ok(None);
        }

        let Some(token) = self.credentials.load_token().await? else {
            return Ok(None);
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            GatewayError::Credentials("stored token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(Some(headers))
    }

    fn classify(response: GatewayResponse) -> Reply {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .server_message()
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

        if status == StatusCode::UNAUTHORIZED {
            Err(GatewayError::Unauthorized { message })
        } else {
            Err(GatewayError::ServerError { status: status.as_u16(), message })
        }
    }

    fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

/// Resolve `path` against `base`; absolute URLs pass through untouched.
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Builder for [`RequestGateway`]
pub struct RequestGatewayBuilder {
    api: ApiConfig,
    timeout: Option<Duration>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl Default for RequestGatewayBuilder {
    fn default() -> Self {
        Self { api: ApiConfig::default(), timeout: None, credentials: None }
    }
}

impl RequestGatewayBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
        self.api.refresh_path = path.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn credential_mode(mut self, mode: CredentialMode) -> Self {
        self.api.credential_mode = mode;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.api.user_agent = agent.into();
        self
    }

    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Build the gateway
    ///
    /// # Errors
    ///
    /// Returns error if no credential store was provided or the HTTP client
    /// cannot be created
    pub fn build(self) -> Result<RequestGateway, GatewayError> {
        let credentials = self
            .credentials
            .ok_or_else(|| GatewayError::InvalidRequest("credential store not set".to_string()))?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(self.api.timeout_secs));
        let http =
            HttpClient::builder().timeout(timeout).user_agent(self.api.user_agent.clone()).build()?;

        let refresh_url = join_url(&self.api.base_url, &self.api.refresh_path);

        Ok(RequestGateway {
            http,
            base_url: self.api.base_url.trim_end_matches('/').to_string(),
            refresh_url,
            mode: self.api.credential_mode,
            credentials,
            state: Arc::new(Mutex::new(RefreshState::default())),
        })
    }
}
