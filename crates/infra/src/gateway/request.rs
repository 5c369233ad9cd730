//! Request descriptors and buffered responses
//!
//! A [`RequestSpec`] owns everything needed to issue the same call again:
//! bodies are kept as values rather than streams so a replay after a session
//! refresh sends byte-identical payloads.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::GatewayError;

/// One field of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, filename: String, content_type: String, bytes: Vec<u8> },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text { name: name.into(), value: value.into() }
    }

    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self::File {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Buffered request body
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Build a fresh multipart form; reqwest forms are single-use.
    pub(crate) fn to_form(parts: &[FormPart]) -> Result<Form, GatewayError> {
        parts.iter().try_fold(Form::new(), |form, part| match part {
            FormPart::Text { name, value } => Ok(form.text(name.clone(), value.clone())),
            FormPart::File { name, filename, content_type, bytes } => {
                let file = Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .mime_str(content_type)
                    .map_err(|e| {
                        GatewayError::InvalidRequest(format!(
                            "invalid content type '{content_type}' for {filename}: {e}"
                        ))
                    })?;
                Ok(form.part(name.clone(), file))
            }
        })
    }
}

/// Everything needed to issue (and re-issue) one HTTP call
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to the configured base URL, or an absolute URL
    pub path: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub(crate) already_retried: bool,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            already_retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a header, replacing any previous value under the same name.
    ///
    /// # Errors
    /// Returns `GatewayError::InvalidRequest` for names or values that are
    /// not valid HTTP.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, GatewayError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::InvalidRequest(format!("invalid header name: {e}")))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            GatewayError::InvalidRequest(format!("invalid value for header {name}: {e}"))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Serialize `body` once, up front.
    ///
    /// # Errors
    /// Returns `GatewayError::InvalidRequest` if the value cannot be
    /// represented as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(body)
            .map_err(|e| GatewayError::InvalidRequest(format!("failed to serialize body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Opt this request out of the refresh-and-replay protocol.
    ///
    /// A 401 is surfaced straight away as [`GatewayError::Unauthorized`].
    /// Used for the sign-in endpoints, where a 401 means bad credentials
    /// rather than an expired session.
    pub fn skip_refresh(mut self) -> Self {
        self.already_retried = true;
        self
    }

    /// Whether this request has already been through a refresh cycle
    pub fn already_retried(&self) -> bool {
        self.already_retried
    }
}

/// Fully buffered HTTP response
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl GatewayResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// Empty bodies (204/205 and friends) decode as JSON `null`, so `()` and
    /// `Option<T>` targets succeed.
    ///
    /// # Errors
    /// Returns `GatewayError::InvalidResponse` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        let result = if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };

        result.map_err(|e| {
            GatewayError::InvalidResponse(format!(
                "failed to parse {} response body: {e}",
                self.status.as_u16()
            ))
        })
    }

    /// Server-provided `message` (or `error`) field, when the body is JSON.
    pub(crate) fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .filter(|m| !m.trim().is_empty())
            .map(ToString::to_string)
    }
}
