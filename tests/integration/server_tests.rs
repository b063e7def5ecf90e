//! Integration tests for the HTTP endpoints
//!
//! Requests go straight into the router with `oneshot`; the search endpoint
//! and document hosts are wiremock servers.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_acquirer, create_test_config, mock_document, mock_search};
use pdf_harvester::acquire::Acquirer;
use pdf_harvester::config::SiteEntry;
use pdf_harvester::server::{create_router, AppState};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer, root: &Path) -> axum::Router {
    create_router(AppState::new(create_acquirer(server, root)))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let response = app(&server, dir.path())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_extract_downloads_and_lists_files() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mock_search(&server, "ocean tides", &[format!("{}/tides.pdf", base)]).await;
    mock_document(&server, "/tides.pdf", b"%PDF").await;

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/extract",
        json!({ "query": "ocean tides" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["files"], json!(["ocean_tides/tides.pdf"]));
    assert_eq!(
        body["message"],
        json!("Successfully downloaded 1 PDFs for \"ocean tides\".")
    );
}

#[tokio::test]
async fn test_extract_without_query_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) = post_json(app(&server, dir.path()), "/api/extract", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query is required" }));
}

#[tokio::test]
async fn test_extract_upstream_failure_is_server_error() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/extract",
        json!({ "query": "anything" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Search failed"));
}

#[tokio::test]
async fn test_scrape_returns_candidates_without_downloading() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<a href="/files/volcano.pdf">V</a>"#),
        )
        .mount(&server)
        .await;

    let sites = vec![SiteEntry {
        name: "List".to_string(),
        url: format!("{}/list?q=[KEYWORD]", base),
    }];
    let config = create_test_config(&base, dir.path(), sites);
    let app = create_router(AppState::new(Acquirer::from_config(&config, None).unwrap()));

    let (status, body) = post_json(app, "/api/scrape", json!({ "keyword": "volcano" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Found 1 potential PDF links."));
    assert_eq!(
        body["results"],
        json!([{
            "url": format!("{}/files/volcano.pdf", base),
            "source": "scraper",
            "filename": "volcano.pdf",
        }])
    );
    assert!(!dir.path().join("volcano").exists());
}

#[tokio::test]
async fn test_scrape_without_keyword_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/scrape",
        json!({ "keyword": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Keyword is required" }));
}

#[tokio::test]
async fn test_download_reports_files_and_error_count() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mock_document(&server, "/a.pdf", b"a").await;
    Mock::given(method("GET"))
        .and(path("/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/download",
        json!({
            "urls": [format!("{}/a.pdf", base), format!("{}/missing.pdf", base)],
            "query": "saved docs",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["files"], json!(["saved_docs/a.pdf"]));
    assert_eq!(body["errorCount"], json!(1));
    assert!(dir.path().join("saved_docs/a.pdf").exists());
}

#[tokio::test]
async fn test_download_validation() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/download",
        json!({ "urls": [], "query": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "A list of URLs is required" }));

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/download",
        json!({ "urls": ["https://example.com/a.pdf"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query/Folder name is required" }));
}

#[tokio::test]
async fn test_bulk_summary_shape() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mock_search(&server, "a", &[format!("{}/a1.pdf", base)]).await;
    mock_search(&server, "b", &[]).await;
    mock_document(&server, "/a1.pdf", b"1").await;

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/bulk",
        json!({ "topics": ["a", "b"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["summary"],
        json!({ "totalTopics": 2, "successCount": 2, "failedCount": 0 })
    );
    assert_eq!(body["allFiles"], json!(["a/a1.pdf"]));
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][1]["query"], json!("b"));
    assert_eq!(
        body["message"],
        json!("Processed 2 topics. Successfully downloaded PDFs for 2 topics.")
    );
}

#[tokio::test]
async fn test_bulk_with_empty_topics_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/bulk",
        json!({ "topics": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Topics list is required and must be a non-empty array" })
    );
}

#[tokio::test]
async fn test_bulk_with_non_array_topics_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/bulk",
        json!({ "topics": "physics" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Topics list is required and must be a non-empty array" })
    );
}

#[tokio::test]
async fn test_download_with_non_array_urls_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) = post_json(
        app(&server, dir.path()),
        "/api/download",
        json!({ "urls": "https://example.com/a.pdf", "query": "t" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "A list of URLs is required" }));
}

#[tokio::test]
async fn test_extract_with_wrong_query_type_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) =
        post_json(app(&server, dir.path()), "/api/extract", json!({ "query": 42 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query is required" }));
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (status, body) = post_raw(
        app(&server, dir.path()),
        "/api/extract",
        "not json".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query is required" }));

    let (status, body) = post_raw(
        app(&server, dir.path()),
        "/api/scrape",
        "{\"keyword\":".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Keyword is required" }));
}
