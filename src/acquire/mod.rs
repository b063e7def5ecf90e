//! Acquisition module: discovery, fetching and persistence
//!
//! This module contains the topic-to-files pipeline, including:
//! - HTTP fetching with per-request timeouts
//! - Keyword search against a third-party endpoint
//! - Link extraction from crawled listing pages
//! - Sequential fetch-and-persist into per-topic folders
//! - Batch runs over a list of topics

mod batch;
mod extractor;
mod fetcher;
mod pipeline;
mod search;

pub use extractor::extract_candidate_links;
pub use fetcher::{build_http_client, Fetcher};
pub use pipeline::{Acquirer, Source};
pub use search::{candidates_from_response, OrganicResult, SearchProvider, SearchResponse};
