use serde::Deserialize;

/// Placeholder in a site URL that is replaced by the encoded keyword
pub const KEYWORD_PLACEHOLDER: &str = "[KEYWORD]";

/// Main configuration structure for PDF Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(rename = "site", default = "default_sites")]
    pub sites: Vec<SiteEntry>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the identifying header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.client_name, self.client_version, self.contact_url
        )
    }
}

/// Keyword search endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint returning `organic_results` JSON
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// API key for the search endpoint
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Restriction appended to every topic query
    #[serde(rename = "query-suffix", default = "default_query_suffix")]
    pub query_suffix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            api_key: None,
            query_suffix: default_query_suffix(),
        }
    }
}

/// Per-request timeouts, in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    /// Call to the search endpoint
    #[serde(rename = "search-secs", default = "default_search_secs")]
    pub search_secs: u64,

    /// Each document found through the search endpoint
    #[serde(rename = "search-download-secs", default = "default_search_download_secs")]
    pub search_download_secs: u64,

    /// Each document in a direct download request
    #[serde(rename = "direct-download-secs", default = "default_direct_download_secs")]
    pub direct_download_secs: u64,

    /// Each site page fetched during a crawl
    #[serde(rename = "page-secs", default = "default_page_secs")]
    pub page_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            search_secs: default_search_secs(),
            search_download_secs: default_search_download_secs(),
            direct_download_secs: default_direct_download_secs(),
            page_secs: default_page_secs(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one folder per topic
    #[serde(rename = "root-dir", default = "default_root_dir")]
    pub root_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
        }
    }
}

/// Site crawl configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Cap on the aggregated candidate list
    #[serde(rename = "max-results", default = "default_max_results")]
    pub max_results: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// A site crawled for document links
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Display name of the site
    pub name: String,

    /// Page URL, optionally containing `[KEYWORD]`
    pub url: String,
}

impl SiteEntry {
    /// Returns the page URL for a keyword, substituting the placeholder
    pub fn url_for(&self, keyword: &str) -> String {
        let encoded: String = ::url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        self.url.replace(KEYWORD_PLACEHOLDER, &encoded)
    }
}

fn default_search_endpoint() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_query_suffix() -> String {
    "filetype:pdf".to_string()
}

fn default_search_secs() -> u64 {
    20
}

fn default_search_download_secs() -> u64 {
    15
}

fn default_direct_download_secs() -> u64 {
    20
}

fn default_page_secs() -> u64 {
    15
}

fn default_root_dir() -> String {
    "./pdfs".to_string()
}

fn default_max_results() -> usize {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_sites() -> Vec<SiteEntry> {
    vec![SiteEntry {
        name: "Internet Archive".to_string(),
        url: "https://archive.org/search.php?query=[KEYWORD]+AND+mediatype:texts".to_string(),
    }]
}
