//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::api::{AgentsApi, ContextApi, DecisionsApi};
use crate::error::{Error, ErrorResponse, Result};
use crate::types::validate_identifier;

/// Default craft ai API location.
pub const DEFAULT_URL: &str = "https://beta.craft.ai";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// craft ai API client.
///
/// Every request is scoped to the owner given at build time:
/// `{base_url}/api/{owner}/...`.
///
/// # Example
///
/// ```no_run
/// use craftai_client::CraftClient;
///
/// # async fn example() -> craftai_client::Result<()> {
/// let client = CraftClient::builder()
///     .owner("gisele")
///     .token("secret")
///     .build()?;
///
/// let agent = client.agents().get("thermostat").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CraftClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Owner namespace.
    pub(crate) owner: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
}

impl CraftClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the owner every request is scoped to.
    pub fn owner(&self) -> &str {
        &self.inner.owner
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    /// Access the context operations API.
    pub fn context(&self) -> ContextApi {
        ContextApi::new(self.clone())
    }

    /// Access the decision tree and decision API.
    pub fn decisions(&self) -> DecisionsApi {
        DecisionsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an owner-scoped API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("api/{}/{}", self.inner.owner, path))
            .map_err(Error::from)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let request = self.inner.http.get(url);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self.inner.http.get(url).query(query);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self.inner.http.post(url).json(body);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a POST request whose response body is not needed.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self.inner.http.post(url).json(body);
        let response = self.send(request).await?;

        if !is_ok(response.status()) {
            return Err(self.extract_error(response).await);
        }

        Ok(())
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        let request = self.inner.http.delete(url);
        let response = self.send(request).await?;

        if !is_ok(response.status()) {
            return Err(self.extract_error(response).await);
        }

        Ok(())
    }

    /// Apply the request timeout and send.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.timeout(self.inner.timeout).build()?;
        debug!(method = %request.method(), url = %request.url(), "craft ai request");
        Ok(self.inner.http.execute(request).await?)
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if is_ok(response.status()) {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let url = response.url().clone();

        // Try to parse error response
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(ErrorResponse::into_message),
            Err(_) => None,
        }
        .unwrap_or_else(|| format!("HTTP {}", status));

        warn!(status, url = %url, message = %message, "craft ai request failed");
        Error::from_status(status, message)
    }
}

/// The service answers 200 or 201 on success; any other status is an error.
fn is_ok(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201)
}

/// Builder for creating a CraftClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    owner: Option<String>,
    token: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            owner: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the API URL. Defaults to [`DEFAULT_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the owner namespace.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CraftClient> {
        let owner = self
            .owner
            .filter(|o| !o.is_empty())
            .ok_or_else(|| Error::Config("owner is required".to_string()))?;
        validate_identifier(&owner)
            .map_err(|reason| Error::Config(format!("invalid owner '{}': {}", owner, reason)))?;

        // Parse and normalize base URL
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_URL);
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Config("Invalid token".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // Build HTTP client
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("craftai-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(CraftClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                owner,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
