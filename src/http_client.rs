use crate::error::SitemapError;
use reqwest::{Client, Response};
use std::time::Duration;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds, `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: format!("sitemap-diff/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Async HTTP client for downloading sitemap documents.
///
/// Every call is a single attempt; failures are returned, never retried.
pub struct AsyncHttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl AsyncHttpClient {
    /// Create a new async HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, SitemapError> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .pool_idle_timeout(Duration::from_secs(30));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(SitemapError::from)?;

        Ok(Self { client, config })
    }

    /// GET `url` and return the body decoded as text
    pub async fn fetch_text(&self, url: &str) -> Result<String, SitemapError> {
        let response = self.get_checked(url).await?;
        response.text().await.map_err(SitemapError::from)
    }

    /// Issue one GET; statuses outside 2xx/3xx become [`SitemapError::HttpStatus`]
    async fn get_checked(&self, url: &str) -> Result<Response, SitemapError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SitemapError::from)?;

        let status = response.status();
        if Self::is_acceptable_status(status.as_u16()) {
            return Ok(response);
        }

        Err(SitemapError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            message: format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        })
    }

    /// 2xx and 3xx responses carry a usable body
    fn is_acceptable_status(status: u16) -> bool {
        (200..400).contains(&status)
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}
