//! Reqwest-backed client for the remote ctb-web backend.

mod api;
mod wire;

use ctb_core::{ApiError, CookieJar};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

/// The `real` API variant: a thin client over the backend's HTTP contract.
///
/// Carries a shared [`CookieJar`] so authenticated requests pick up the
/// current token at call time rather than at construction time.
#[derive(Clone)]
pub struct CtbClient {
    client: Client,
    base_url: String,
    jar: Arc<CookieJar>,
}

impl CtbClient {
    /// Create a client with default configuration.
    pub fn new(base_url: impl Into<String>, jar: Arc<CookieJar>) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url).jar(jar).build()
    }

    /// Create a new client builder.
    pub fn builder() -> CtbClientBuilder {
        CtbClientBuilder::default()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Create a request builder for a backend path.
    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }
}

/// Map transport failures, keeping timeouts distinguishable.
pub(crate) fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Builder for [`CtbClient`].
#[derive(Default)]
pub struct CtbClientBuilder {
    base_url: Option<String>,
    jar: Option<Arc<CookieJar>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CtbClientBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the cookie jar the bearer token is read from.
    pub fn jar(mut self, jar: Arc<CookieJar>) -> Self {
        self.jar = Some(jar);
        self
    }

    /// Set the request timeout. Defaults to 30 seconds; a hung backend
    /// surfaces as [`ApiError::Timeout`] instead of a never-resolving call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CtbClient, ApiError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Configuration("base_url is required".into()))?;
        let jar = self
            .jar
            .ok_or_else(|| ApiError::Configuration("cookie jar is required".into()))?;

        // Paths are joined with a leading slash, so trim any trailing one.
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| format!("ctb-client/{}", env!("CARGO_PKG_VERSION"))),
            )
            .build()
            .map_err(|err| ApiError::Configuration(err.to_string()))?;

        Ok(CtbClient {
            client,
            base_url,
            jar,
        })
    }
}
