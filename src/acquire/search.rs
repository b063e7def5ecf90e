//! Keyword search provider
//!
//! Queries a third-party search endpoint (SerpApi-compatible) for a topic
//! restricted to PDF results, and turns matching result links into candidates.

use crate::acquire::Fetcher;
use crate::config::SearchConfig;
use crate::model::{CandidateLink, SEARCH_SOURCE_LABEL};
use crate::url::{filename_for_url, has_document_extension};
use crate::HarvestError;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Search endpoint response
///
/// Only the fields used here are modeled; everything is optional because the
/// endpoint omits `organic_results` when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic_results: Option<Vec<OrganicResult>>,

    /// Set by the endpoint when the query itself was rejected
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of `organic_results`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
}

/// Client for the keyword search endpoint
#[derive(Debug, Clone)]
pub struct SearchProvider {
    fetcher: Fetcher,
    endpoint: Url,
    api_key: String,
    query_suffix: String,
    timeout: Duration,
}

impl SearchProvider {
    /// Creates a provider; the API key is handed in explicitly at startup
    pub fn new(
        fetcher: Fetcher,
        config: &SearchConfig,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HarvestError> {
        Ok(Self {
            fetcher,
            endpoint: Url::parse(&config.endpoint)?,
            api_key: api_key.into(),
            query_suffix: config.query_suffix.clone(),
            timeout,
        })
    }

    /// Builds the request URL for a topic
    pub fn query_url(&self, topic: &str) -> Url {
        let query = if self.query_suffix.is_empty() {
            topic.to_string()
        } else {
            format!("{} {}", topic, self.query_suffix)
        };

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("api_key", &self.api_key);
        url
    }

    /// Searches for documents about `topic`
    ///
    /// Makes exactly one request. Results keep the provider's ranking.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CandidateLink>)` - Result links ending in `.pdf`, possibly empty
    /// * `Err(HarvestError::Upstream)` - The request failed, the body was not the
    ///   expected JSON, or the endpoint reported an error for the query
    pub async fn search_documents(&self, topic: &str) -> Result<Vec<CandidateLink>, HarvestError> {
        let url = self.query_url(topic);
        tracing::info!("Searching for \"{}\"", topic);

        let response: SearchResponse = self
            .fetcher
            .fetch_json(url.as_str(), self.timeout)
            .await
            .map_err(|e| HarvestError::Upstream(redact_api_key(&e.to_string(), &self.api_key)))?;

        if let Some(error) = response.error {
            return Err(HarvestError::Upstream(error));
        }

        let candidates = candidates_from_response(response);
        tracing::info!(
            "Search for \"{}\" returned {} PDF candidates",
            topic,
            candidates.len()
        );
        Ok(candidates)
    }
}

/// Masks the API key in messages that embed the request URL
fn redact_api_key(message: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        message.to_string()
    } else {
        message.replace(api_key, "***")
    }
}

/// Keeps result links that end in `.pdf`, in response order
pub fn candidates_from_response(response: SearchResponse) -> Vec<CandidateLink> {
    response
        .organic_results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|result| result.link)
        .filter(|link| has_document_extension(link))
        .map(|link| CandidateLink {
            suggested_filename: filename_for_url(&link),
            url: link,
            source_label: SEARCH_SOURCE_LABEL.to_string(),
        })
        .collect()
}
