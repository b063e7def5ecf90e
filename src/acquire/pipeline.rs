//! Acquisition pipeline - topic to stored files
//!
//! One run goes search (or crawl) -> filter -> fetch -> persist for a single
//! topic. Everything inside a run is sequential: candidates are fetched and
//! written one at a time, in discovery order. This keeps load on upstream
//! services bounded and makes the output order deterministic.

use crate::acquire::{extract_candidate_links, Fetcher, SearchProvider};
use crate::config::{Config, SiteEntry};
use crate::model::{CandidateLink, DownloadOutcome, DownloadReport, PipelineResult};
use crate::storage::{FolderStore, TopicFolder};
use crate::url::filename_for_url;
use crate::HarvestError;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Where a pipeline run gets its candidate links from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// One call to the keyword search endpoint
    SearchProviderLookup,
    /// One fetch and extraction pass per listed page URL
    SiteCrawl(Vec<String>),
}

/// Per-request timeouts used by the pipeline
#[derive(Debug, Clone, Copy)]
struct Timeouts {
    search_download: Duration,
    direct_download: Duration,
    page: Duration,
}

/// Runs pipeline operations against shared fetcher and storage
pub struct Acquirer {
    fetcher: Fetcher,
    search: Option<SearchProvider>,
    store: FolderStore,
    sites: Vec<SiteEntry>,
    max_scrape_results: usize,
    timeouts: Timeouts,
}

impl Acquirer {
    /// Builds an acquirer from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration
    /// * `api_key` - Search API key; without one, search-backed runs fail upstream
    pub fn from_config(config: &Config, api_key: Option<String>) -> Result<Self, HarvestError> {
        let fetcher = Fetcher::new(&config.user_agent)?;

        let search = match api_key {
            Some(key) => Some(SearchProvider::new(
                fetcher.clone(),
                &config.search,
                key,
                Duration::from_secs(config.timeouts.search_secs),
            )?),
            None => {
                tracing::warn!("No search API key configured; search-backed runs will fail");
                None
            }
        };

        Ok(Self::new(
            fetcher,
            search,
            FolderStore::new(&config.storage.root_dir),
            config,
        ))
    }

    /// Assembles an acquirer from its parts
    pub fn new(
        fetcher: Fetcher,
        search: Option<SearchProvider>,
        store: FolderStore,
        config: &Config,
    ) -> Self {
        Self {
            fetcher,
            search,
            store,
            sites: config.sites.clone(),
            max_scrape_results: config.scrape.max_results,
            timeouts: Timeouts {
                search_download: Duration::from_secs(config.timeouts.search_download_secs),
                direct_download: Duration::from_secs(config.timeouts.direct_download_secs),
                page: Duration::from_secs(config.timeouts.page_secs),
            },
        }
    }

    /// Page URLs of the configured sites for a keyword
    pub fn site_urls(&self, keyword: &str) -> Vec<String> {
        self.sites.iter().map(|site| site.url_for(keyword)).collect()
    }

    /// Runs the pipeline for one topic
    ///
    /// Never fails: validation and upstream problems come back as a result
    /// with `success == false`. Per-candidate failures are recorded in
    /// `failures` and do not affect `success`.
    pub async fn acquire_documents(&self, topic: &str, source: Source) -> PipelineResult {
        match self.try_acquire_documents(topic, source).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Pipeline for \"{}\" failed: {}", topic, e);
                PipelineResult::failed(topic, e.to_string())
            }
        }
    }

    /// Runs the pipeline for one topic, surfacing pipeline-level errors
    ///
    /// # Returns
    ///
    /// * `Ok(PipelineResult)` - The run completed, possibly with zero files
    /// * `Err(HarvestError::Validation)` - Empty topic; nothing was done
    /// * `Err(_)` - Discovery or folder creation failed before any download
    pub async fn try_acquire_documents(
        &self,
        topic: &str,
        source: Source,
    ) -> Result<PipelineResult, HarvestError> {
        self.validate_topic(topic)?;

        let download_timeout = match source {
            Source::SearchProviderLookup => self.timeouts.search_download,
            Source::SiteCrawl(_) => self.timeouts.direct_download,
        };

        let candidates = self.discover(topic, source).await?;
        let folder = self.store.topic_folder(topic).await?;

        tracing::info!(
            "Downloading {} candidates for \"{}\" into {}",
            candidates.len(),
            topic,
            folder.path().display()
        );

        let outcomes = self
            .fetch_and_persist(&folder, &candidates, download_timeout)
            .await;
        let result = PipelineResult::completed(topic, outcomes);

        tracing::info!(
            "Pipeline for \"{}\" finished: {} saved, {} failed",
            topic,
            result.files.len(),
            result.failures.len()
        );
        Ok(result)
    }

    /// Finds candidate links for a topic without downloading them
    pub async fn discover(
        &self,
        topic: &str,
        source: Source,
    ) -> Result<Vec<CandidateLink>, HarvestError> {
        match source {
            Source::SearchProviderLookup => {
                let search = self.search.as_ref().ok_or_else(|| {
                    HarvestError::Upstream("search API key is not configured".to_string())
                })?;
                search.search_documents(topic).await
            }
            Source::SiteCrawl(site_urls) => {
                let mut candidates = self.crawl_sites(topic, &site_urls).await;
                candidates.truncate(self.max_scrape_results);
                Ok(candidates)
            }
        }
    }

    /// Crawls the configured sites for a keyword and returns candidates
    ///
    /// The aggregated list is capped at the configured maximum. Nothing is downloaded.
    pub async fn scrape_candidates(&self, keyword: &str) -> Result<Vec<CandidateLink>, HarvestError> {
        self.validate_keyword(keyword)?;
        let site_urls = self.site_urls(keyword);
        self.discover(keyword, Source::SiteCrawl(site_urls)).await
    }

    /// Fetches each page once and merges extracted links, deduplicated by URL
    ///
    /// A page that cannot be fetched is logged and skipped.
    async fn crawl_sites(&self, keyword: &str, site_urls: &[String]) -> Vec<CandidateLink> {
        let mut seen = HashSet::new();
        let mut all = Vec::new();

        for site_url in site_urls {
            let page_url = match Url::parse(site_url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping invalid site URL {}: {}", site_url, e);
                    continue;
                }
            };

            let html = match self.fetcher.fetch_text(site_url, self.timeouts.page).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Error scraping {}: {}", site_url, e);
                    continue;
                }
            };

            let links = extract_candidate_links(&html, &page_url, keyword);
            tracing::debug!("{} candidate links on {}", links.len(), site_url);

            for link in links {
                if seen.insert(link.url.clone()) {
                    all.push(link);
                }
            }
        }

        all
    }

    /// Downloads the given URLs straight into the topic folder
    ///
    /// Skips discovery entirely. Each URL is attempted once, in order.
    pub async fn download_urls(
        &self,
        topic: &str,
        urls: &[String],
    ) -> Result<DownloadReport, HarvestError> {
        if urls.is_empty() {
            return Err(HarvestError::Validation(
                "A list of URLs is required".to_string(),
            ));
        }
        if topic.trim().is_empty() {
            return Err(HarvestError::Validation(
                "Query/Folder name is required".to_string(),
            ));
        }
        self.validate_topic(topic)?;

        let candidates: Vec<CandidateLink> = urls
            .iter()
            .map(|url| CandidateLink {
                url: url.clone(),
                source_label: "direct".to_string(),
                suggested_filename: filename_for_url(url),
            })
            .collect();

        let folder = self.store.topic_folder(topic).await?;
        let outcomes = self
            .fetch_and_persist(&folder, &candidates, self.timeouts.direct_download)
            .await;

        let report = DownloadReport::from_outcomes(outcomes);
        tracing::info!("Direct download for \"{}\": {}", topic, report.message);
        Ok(report)
    }

    /// Fetches and writes each candidate in turn
    ///
    /// A failed fetch or write is recorded and the loop moves on; there are no retries.
    async fn fetch_and_persist(
        &self,
        folder: &TopicFolder,
        candidates: &[CandidateLink],
        timeout: Duration,
    ) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let bytes = match self.fetcher.fetch_bytes(&candidate.url, timeout).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Failed to download {}: {}", candidate.url, e);
                    outcomes.push(DownloadOutcome::failed(&candidate.url, e));
                    continue;
                }
            };

            let filename = if candidate.suggested_filename.is_empty() {
                filename_for_url(&candidate.url)
            } else {
                candidate.suggested_filename.clone()
            };

            match folder.write(&filename, &bytes).await {
                Ok(relative_path) => {
                    tracing::debug!("Saved {} ({} bytes)", relative_path, bytes.len());
                    outcomes.push(DownloadOutcome::saved(&candidate.url, relative_path));
                }
                Err(e) => {
                    tracing::warn!("Failed to save {}: {}", candidate.url, e);
                    outcomes.push(DownloadOutcome::failed(&candidate.url, e));
                }
            }
        }

        outcomes
    }

    /// Rejects topics that are empty or cannot name a folder
    fn validate_topic(&self, topic: &str) -> Result<(), HarvestError> {
        if topic.trim().is_empty() {
            return Err(HarvestError::Validation("Query is required".to_string()));
        }
        self.store
            .folder_path(topic)
            .map_err(|e| HarvestError::Validation(e.to_string()))?;
        Ok(())
    }

    fn validate_keyword(&self, keyword: &str) -> Result<(), HarvestError> {
        if keyword.trim().is_empty() {
            return Err(HarvestError::Validation("Keyword is required".to_string()));
        }
        Ok(())
    }
}
