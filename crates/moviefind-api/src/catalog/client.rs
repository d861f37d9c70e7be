//! `CatalogClient` - movie catalog API client implementation.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::descriptor::RequestDescriptor;
use super::types::{CatalogErrorResponse, CatalogSearchResponse};

/// Default base URL of the catalog API.
pub const DEFAULT_BASE_URL: &str = "https://imdb236.p.rapidapi.com/api/imdb/";

/// Default value of the `X-RapidAPI-Host` header.
pub const DEFAULT_API_HOST: &str = "imdb236.p.rapidapi.com";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-RapidAPI-Key";

/// Header carrying the API host.
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Movie catalog API client.
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key.
    api_key: String,
    /// API host header value.
    api_host: String,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_host", &self.api_host)
            .finish_non_exhaustive()
    }
}

/// Builder for `CatalogClient`.
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_host: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for CatalogClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key_set", &self.api_key.is_some())
            .field("api_host", &self.api_host)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_host: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required, must not be empty).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API host header value (required).
    #[must_use]
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a per-request timeout. Requests never time out when unset.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `api_host` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .context("api_key is required")?;
        let api_host = self
            .api_host
            .filter(|host| !host.is_empty())
            .context("api_host is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
            api_key,
            api_host,
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a single GET request with the RapidAPI headers and decodes
    /// the body as JSON.
    #[instrument(skip_all, fields(url = %url))]
    async fn get_json(&self, url: Url) -> Result<serde_json::Value> {
        let request = self
            .http_client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_HOST_HEADER, &self.api_host)
            .build()
            .with_context(|| format!("failed to build request: {url}"))?;

        tracing::debug!(url = %request.url(), "catalog API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<CatalogErrorResponse>(&body) {
                bail!(
                    "catalog API error (HTTP {}): {}",
                    status,
                    error_response.message,
                );
            }
            bail!("catalog API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {url}"))?;
        let parsed = serde_json::from_str(&body)
            .with_context(|| format!("failed to decode JSON response: {url}"))?;
        Ok(parsed)
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip_all, fields(descriptor = %descriptor))]
    async fn search(&self, descriptor: &RequestDescriptor) -> Result<CatalogSearchResponse> {
        let url = descriptor.to_url(&self.base_url)?;
        let body = self.get_json(url).await?;
        Ok(CatalogSearchResponse::from_json(body))
    }
}
