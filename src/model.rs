//! Records produced by the acquisition pipeline
//!
//! All of these are transient: they live for one request and are serialized
//! into the HTTP responses as camelCase JSON.

use serde::Serialize;

/// Label for candidates found through the search endpoint
pub const SEARCH_SOURCE_LABEL: &str = "search";

/// Label for candidates found by crawling configured sites
pub const SCRAPER_SOURCE_LABEL: &str = "scraper";

/// A URL believed to reference a document, not yet fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateLink {
    pub url: String,
    #[serde(rename = "source")]
    pub source_label: String,
    #[serde(rename = "filename")]
    pub suggested_filename: String,
}

/// Result of fetching and persisting one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOutcome {
    pub url: String,
    /// `<folder>/<filename>` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DownloadOutcome {
    pub fn saved(url: &str, relative_path: String) -> Self {
        Self {
            url: url.to_string(),
            relative_path: Some(relative_path),
            success: true,
            error_detail: None,
        }
    }

    pub fn failed(url: &str, error: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            relative_path: None,
            success: false,
            error_detail: Some(error.to_string()),
        }
    }
}

/// Outcome of one pipeline run for a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub topic: String,
    /// True when the run completed, regardless of how many files were saved
    pub success: bool,
    pub message: String,
    /// Relative paths of saved files, in discovery order
    pub files: Vec<String>,
    pub query: String,
    /// Per-candidate failures; the run continued past each of them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DownloadOutcome>,
}

impl PipelineResult {
    /// Builds a completed result from the per-candidate outcomes
    pub fn completed(topic: &str, outcomes: Vec<DownloadOutcome>) -> Self {
        let (saved, failures): (Vec<_>, Vec<_>) =
            outcomes.into_iter().partition(|outcome| outcome.success);
        let files: Vec<String> = saved
            .into_iter()
            .filter_map(|outcome| outcome.relative_path)
            .collect();

        Self {
            topic: topic.to_string(),
            success: true,
            message: format!(
                "Successfully downloaded {} PDFs for \"{}\".",
                files.len(),
                topic
            ),
            files,
            query: topic.to_string(),
            failures,
        }
    }

    /// Builds a result for a run that stopped before any download
    pub fn failed(topic: &str, message: impl Into<String>) -> Self {
        Self {
            topic: topic.to_string(),
            success: false,
            message: message.into(),
            files: Vec::new(),
            query: topic.to_string(),
            failures: Vec::new(),
        }
    }
}

/// Counts over a batch of pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCounts {
    pub total_topics: usize,
    pub success_count: usize,
    pub failed_count: usize,
}

/// Aggregate of a batch: one pipeline result per topic, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub summary: BatchCounts,
    pub results: Vec<PipelineResult>,
    /// Files of all successful runs, topic order then discovery order
    pub all_files: Vec<String>,
    pub message: String,
}

impl BatchSummary {
    /// Aggregates per-topic results
    pub fn from_results(results: Vec<PipelineResult>) -> Self {
        let total_topics = results.len();
        let success_count = results.iter().filter(|r| r.success).count();
        let all_files: Vec<String> = results
            .iter()
            .filter(|r| r.success)
            .flat_map(|r| r.files.iter().cloned())
            .collect();

        Self {
            summary: BatchCounts {
                total_topics,
                success_count,
                failed_count: total_topics - success_count,
            },
            message: format!(
                "Processed {} topics. Successfully downloaded PDFs for {} topics.",
                total_topics, success_count
            ),
            results,
            all_files,
        }
    }

    pub fn total_topics(&self) -> usize {
        self.summary.total_topics
    }

    pub fn success_count(&self) -> usize {
        self.summary.success_count
    }

    pub fn failed_count(&self) -> usize {
        self.summary.failed_count
    }
}

/// Result of a direct download request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReport {
    pub message: String,
    pub files: Vec<String>,
    /// `"<url>: <reason>"` per failed URL
    pub errors: Vec<String>,
    pub error_count: usize,
}

impl DownloadReport {
    pub fn from_outcomes(outcomes: Vec<DownloadOutcome>) -> Self {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for outcome in outcomes {
            match (outcome.relative_path, outcome.error_detail) {
                (Some(path), _) if outcome.success => files.push(path),
                (_, detail) => errors.push(format!(
                    "{}: {}",
                    outcome.url,
                    detail.unwrap_or_else(|| "unknown error".to_string())
                )),
            }
        }

        Self {
            message: format!("Downloaded {} files. Errors: {}", files.len(), errors.len()),
            error_count: errors.len(),
            files,
            errors,
        }
    }
}
