//! Request gateway
//!
//! Every API call goes through [`Gateway::send`]. The gateway resolves paths
//! against the configured base URL, sends JSON, replays validators as
//! `If-None-Match`, tolerates malformed bodies and turns error responses into
//! [`MinutesError`]s. A 401 additionally fires the registered unauthorized
//! handler before the error is returned.

use minutes_core::{UnauthorizedHandler, UnauthorizedSignal};
use minutes_domain::constants::{ETAG_HEADER, IF_NONE_MATCH_HEADER};
use minutes_domain::{ClientConfig, MinutesError, Result};
use parking_lot::RwLock;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::HttpClient;
use crate::errors::InfraError;

/// Per-call options for [`Gateway::send`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    /// Validator (ETag) of the caller's cached copy
    pub validator: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, body: None, headers: Vec::new(), validator: None }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Option<Value>) -> Self {
        Self { method: Method::POST, body, ..Self::default() }
    }

    pub fn patch(body: Value) -> Self {
        Self { method: Method::PATCH, body: Some(body), ..Self::default() }
    }

    pub fn delete() -> Self {
        Self { method: Method::DELETE, ..Self::default() }
    }

    pub fn with_validator(mut self, validator: Option<&str>) -> Self {
        self.validator = validator.map(str::to_string);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// What a call produced when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    /// Parsed JSON body; `None` for empty, malformed or 304 responses
    pub body: Option<Value>,
    /// Response `ETag`, or the request's validator on a 304
    pub validator: Option<String>,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED.as_u16()
    }

    /// Decode the body into `T`. An absent body decodes to `None`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.body {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|err| MinutesError::from(InfraError::from(err))),
        }
    }

    /// Like [`Self::json`], but an absent body is an error.
    pub fn require<T: DeserializeOwned>(&self) -> Result<T> {
        self.json()?.ok_or_else(|| {
            MinutesError::Decode(format!("expected a JSON body with status {}", self.status))
        })
    }

    /// Fail with `Api{status, canonical reason}` unless the status is 2xx.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let reason = StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("unexpected status");
        Err(MinutesError::api(self.status, reason))
    }
}

/// Single entry point for API requests
pub struct Gateway {
    http: HttpClient,
    base_url: String,
    unauthorized: RwLock<Option<UnauthorizedHandler>>,
}

impl Gateway {
    /// Gateway over `http` for the API rooted at `base_url`.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|err| MinutesError::from(InfraError::from(err)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MinutesError::Config(format!(
                "API base URL must be http(s): {base_url}"
            )));
        }
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            unauthorized: RwLock::new(None),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(HttpClient::from_config(config)?, &config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request.
    ///
    /// # Errors
    /// - `Unauthorized` on 401, after the unauthorized handler has run
    /// - `Api` for any other non-2xx response whose body has an `error` field
    /// - `Network` when the transport fails
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn send(&self, path: &str, options: RequestOptions) -> Result<GatewayResponse> {
        let url = self.url(path);
        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(validator) = &options.validator {
            request = request.header(IF_NONE_MATCH_HEADER, validator.as_str());
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!(%url, "not modified");
            return Ok(GatewayResponse {
                status: status.as_u16(),
                body: None,
                validator: options.validator,
            });
        }

        let validator = response
            .headers()
            .get(ETAG_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = read_json_body(response).await;

        if status == StatusCode::UNAUTHORIZED {
            warn!(%url, "request rejected as unauthorized");
            self.notify_unauthorized();
            return Err(MinutesError::unauthorized(error_message(body.as_ref())));
        }

        if !status.is_success() {
            if let Some(message) = error_message(body.as_ref()) {
                debug!(%url, %status, %message, "API error");
                return Err(MinutesError::api(status.as_u16(), message));
            }
        }

        Ok(GatewayResponse { status: status.as_u16(), body, validator })
    }

    fn notify_unauthorized(&self) {
        // Clone out of the lock so the handler may re-register.
        let handler = self.unauthorized.read().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl UnauthorizedSignal for Gateway {
    fn set_unauthorized_handler(&self, handler: UnauthorizedHandler) {
        *self.unauthorized.write() = Some(handler);
    }

    fn clear_unauthorized_handler(&self) {
        *self.unauthorized.write() = None;
    }
}

/// Body as JSON, or `None` when it is empty, unreadable or not JSON.
async fn read_json_body(response: Response) -> Option<Value> {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(error = %err, "failed to read response body");
            return None;
        }
    };
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(&bytes).ok()
}

/// `error` field of an error body, if there is one.
fn error_message(body: Option<&Value>) -> Option<String> {
    match body?.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
