//! Cookie-carrying HTTP transport
//!
//! The API authenticates with a server-side session cookie, so every request
//! made through one [`HttpClient`] shares a cookie jar.

use std::time::Duration;

use minutes_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use minutes_domain::{ClientConfig, MinutesError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP transport with a shared cookie jar and a fixed timeout.
///
/// Requests are sent exactly once; failures are returned to the caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Transport with the default timeout and no custom user agent.
    pub fn new() -> Result<Self, MinutesError> {
        Self::builder().build()
    }

    /// Transport honoring the configured timeout and user agent.
    pub fn from_config(config: &ClientConfig) -> Result<Self, MinutesError> {
        Self::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a prepared request once. Non-2xx statuses are not errors here.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, MinutesError> {
        let request = builder.build().map_err(|err| MinutesError::from(InfraError::from(err)))?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.client.execute(request).await.map_err(|err| {
            debug!(%method, %url, error = %err, "transport failure");
            MinutesError::from(InfraError::from(err))
        })?;

        debug!(%method, %url, status = %response.status(), "response received");
        Ok(response)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    cookie_store: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: None,
            cookie_store: true,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `None` keeps reqwest's default user agent.
    pub fn user_agent(mut self, agent: Option<String>) -> Self {
        self.user_agent = agent;
        self
    }

    /// Session cookies are kept unless disabled here.
    pub fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    pub fn build(self) -> Result<HttpClient, MinutesError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .cookie_store(self.cookie_store)
            .no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| MinutesError::from(InfraError::from(err)))?;
        Ok(HttpClient { client })
    }
}
