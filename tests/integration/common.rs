//! Shared fixtures for integration tests

#![allow(dead_code)]

use pdf_harvester::acquire::Acquirer;
use pdf_harvester::config::{
    Config, ScrapeConfig, SearchConfig, ServerConfig, SiteEntry, StorageConfig, TimeoutConfig,
    UserAgentConfig,
};
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// Creates a test configuration pointing the search endpoint at `server_uri`
pub fn create_test_config(server_uri: &str, root: &Path, sites: Vec<SiteEntry>) -> Config {
    Config {
        user_agent: UserAgentConfig {
            client_name: "TestHarvester".to_string(),
            client_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        search: SearchConfig {
            endpoint: format!("{}/search.json", server_uri),
            api_key: None,
            query_suffix: "filetype:pdf".to_string(),
        },
        timeouts: TimeoutConfig {
            search_secs: 5,
            search_download_secs: 1,
            direct_download_secs: 1,
            page_secs: 5,
        },
        storage: StorageConfig {
            root_dir: root.to_string_lossy().into_owned(),
        },
        scrape: ScrapeConfig { max_results: 20 },
        server: ServerConfig::default(),
        sites,
    }
}

/// Acquirer with a search key, storing under `root`
pub fn create_acquirer(server: &MockServer, root: &Path) -> Acquirer {
    let config = create_test_config(&server.uri(), root, Vec::new());
    Acquirer::from_config(&config, Some(API_KEY.to_string())).expect("Failed to build acquirer")
}

/// Mounts a search response listing `links` for `topic`
pub async fn mock_search(server: &MockServer, topic: &str, links: &[String]) {
    let results: Vec<_> = links.iter().map(|link| json!({ "link": link })).collect();
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", format!("{} filetype:pdf", topic)))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_metadata": { "status": "Success" },
            "organic_results": results,
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a document served at `doc_path`
pub async fn mock_document(server: &MockServer, doc_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(doc_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

/// Sorted file names inside a folder
pub fn folder_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read folder")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
