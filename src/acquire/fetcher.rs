//! HTTP fetcher implementation
//!
//! This module handles every outbound request, including:
//! - Building the HTTP client with the identifying user agent
//! - Single-attempt GET requests with a per-request timeout
//! - Error classification into timeout, network and HTTP status failures
//!
//! There are no retries: each URL gets exactly one attempt and callers decide
//! whether a failure is fatal.

use crate::config::UserAgentConfig;
use crate::{FetchError, FetchResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use pdf_harvester::config::UserAgentConfig;
/// use pdf_harvester::acquire::build_http_client;
///
/// let config = UserAgentConfig {
///     client_name: "PdfHarvester".to_string(),
///     client_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Single-attempt fetcher shared by search, crawl and download paths
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher identifying itself with the configured user agent
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Fetches the raw response body
    pub async fn fetch_bytes(&self, url: &str, timeout: Duration) -> FetchResult<Vec<u8>> {
        let response = self.send(url, timeout).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;
        Ok(bytes.to_vec())
    }

    /// Fetches the response body as text
    pub async fn fetch_text(&self, url: &str, timeout: Duration) -> FetchResult<String> {
        let response = self.send(url, timeout).await?;
        response.text().await.map_err(|e| classify_error(url, e))
    }

    /// Fetches and decodes a JSON response into `T`
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> FetchResult<T> {
        let bytes = self.fetch_bytes(url, timeout).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::InvalidBody {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Sends a GET request and rejects non-success statuses
    async fn send(&self, url: &str, timeout: Duration) -> FetchResult<Response> {
        tracing::trace!("GET {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Maps a reqwest error onto the fetch error kinds
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
