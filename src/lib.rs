//! PDF Harvester: topic-driven document acquisition
//!
//! This crate finds PDF documents for a topic, either through a keyword search
//! endpoint or by crawling a configured list of sites, and stores them in one
//! folder per topic.

pub mod acquire;
pub mod config;
pub mod model;
pub mod output;
pub mod server;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for PDF Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Missing or empty required input; nothing was done
    #[error("{0}")]
    Validation(String),

    /// The search endpoint failed or returned something unusable
    #[error("Search failed: {0}")]
    Upstream(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true if the error was caused by bad caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure of a single outbound request
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unexpected response body from {url}: {message}")]
    InvalidBody { url: String, message: String },
}

impl FetchError {
    /// The URL the failed request was sent to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::HttpStatus { url, .. }
            | Self::InvalidBody { url, .. } => url,
        }
    }
}

/// Result type alias for PDF Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use acquire::{Acquirer, Source};
pub use config::Config;
pub use model::{BatchSummary, CandidateLink, DownloadOutcome, DownloadReport, PipelineResult};
pub use crate::url::{ensure_pdf_suffix, sanitize_segment};
