//! API endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::acquire::Source;
use crate::HarvestError;

/// Error body returned by every endpoint: `{ "error": message }`.
///
/// Validation problems map to 400, everything else to 500.
#[derive(Debug)]
pub struct ApiError(HarvestError);

impl From<HarvestError> for ApiError {
    fn from(error: HarvestError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

const URLS_REQUIRED: &str = "A list of URLs is required";
const TOPICS_REQUIRED: &str = "Topics list is required and must be a non-empty array";

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HarvestError::Validation(message.to_string()).into())
}

/// Unwraps a JSON body, turning any rejection into a 400 with `message`.
///
/// Covers non-JSON bodies, a missing content type and fields of the wrong type.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(HarvestError::Validation(message.to_string()).into())
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub query: Option<String>,
}

/// Search-backed pipeline run for one topic.
pub async fn extract(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body, "Query is required")?;
    let query = required(request.query, "Query is required")?;

    let result = state
        .acquirer
        .try_acquire_documents(&query, Source::SearchProviderLookup)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": result.message,
        "files": result.files,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub keyword: Option<String>,
}

/// Site crawl returning candidate links, not yet downloaded.
pub async fn scrape(
    State(state): State<AppState>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body, "Keyword is required")?;
    let keyword = required(request.keyword, "Keyword is required")?;

    let results = state.acquirer.scrape_candidates(&keyword).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Found {} potential PDF links.", results.len()),
        "results": results,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub urls: Option<Vec<String>>,
    pub query: Option<String>,
}

/// Direct download of the given URLs into the query's folder.
pub async fn download(
    State(state): State<AppState>,
    body: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body, URLS_REQUIRED)?;
    let urls = request
        .urls
        .filter(|urls| !urls.is_empty())
        .ok_or_else(|| HarvestError::Validation(URLS_REQUIRED.to_string()))?;
    let query = required(request.query, "Query/Folder name is required")?;

    let report = state.acquirer.download_urls(&query, &urls).await?;

    Ok(Json(json!({
        "success": true,
        "message": report.message,
        "files": report.files,
        "errorCount": report.error_count,
    })))
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub topics: Option<Vec<String>>,
}

/// Batch of search-backed runs, one per topic, in order.
pub async fn bulk(
    State(state): State<AppState>,
    body: Result<Json<BulkRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body, TOPICS_REQUIRED)?;
    let topics = request.topics.unwrap_or_default();

    let batch = state.acquirer.run_batch(&topics).await?;

    Ok(Json(json!({
        "success": true,
        "summary": batch.summary,
        "results": batch.results,
        "allFiles": batch.all_files,
        "message": batch.message,
    })))
}
