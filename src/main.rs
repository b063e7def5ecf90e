//! PDF Harvester main entry point
//!
//! This is the command-line interface and HTTP service launcher.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pdf_harvester::acquire::{Acquirer, Source};
use pdf_harvester::config::{load_config_with_hash, Config};
use pdf_harvester::output;
use pdf_harvester::server::{self, AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when the config has no search API key
const API_KEY_ENV: &str = "SERPAPI_KEY";

/// PDF Harvester: find and download PDFs for a topic
///
/// Documents are found through a keyword search endpoint or by crawling
/// configured sites, and stored in one folder per topic.
#[derive(Parser, Debug)]
#[command(name = "pdf-harvester")]
#[command(version)]
#[command(about = "Find and download PDF documents by topic", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Search for a topic and download the PDFs found
    Extract {
        /// Topic to search for
        topic: String,
    },

    /// Crawl the configured sites for PDF links
    Scrape {
        /// Keyword to look for
        keyword: String,

        /// Download the links found into the keyword's folder
        #[arg(long)]
        download: bool,
    },

    /// Download the given URLs into a topic folder
    Download {
        /// Topic naming the destination folder
        #[arg(long)]
        query: String,

        /// Document URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Run the search pipeline for several topics, one after another
    Bulk {
        /// Topics to process, in order
        #[arg(required = true)]
        topics: Vec<String>,
    },

    /// Validate the config and show what would be used, without network access
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let api_key = resolve_api_key(&config);

    if let Command::Check = cli.command {
        handle_check(&config, api_key.is_some());
        return Ok(());
    }

    let acquirer = Acquirer::from_config(&config, api_key)?;

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            server::serve(AppState::new(acquirer), &host, port).await?;
        }
        Command::Extract { topic } => {
            let result = acquirer
                .try_acquire_documents(&topic, Source::SearchProviderLookup)
                .await?;
            output::print_pipeline_result(&result);
        }
        Command::Scrape { keyword, download } => {
            if download {
                let site_urls = acquirer.site_urls(&keyword);
                let result = acquirer
                    .try_acquire_documents(&keyword, Source::SiteCrawl(site_urls))
                    .await?;
                output::print_pipeline_result(&result);
            } else {
                let candidates = acquirer.scrape_candidates(&keyword).await?;
                output::print_candidates(&candidates);
            }
        }
        Command::Download { query, urls } => {
            let report = acquirer.download_urls(&query, &urls).await?;
            output::print_download_report(&report);
        }
        Command::Bulk { topics } => {
            let batch = acquirer.run_batch(&topics).await?;
            output::print_batch_summary(&batch);
        }
        Command::Check => {}
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pdf_harvester=info,warn"),
            1 => EnvFilter::new("pdf_harvester=debug,info"),
            2 => EnvFilter::new("pdf_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Picks the API key from config, falling back to the environment once at startup
fn resolve_api_key(config: &Config) -> Option<String> {
    config.search.api_key.clone().or_else(|| {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
    })
}

/// Handles `check`: shows the effective configuration
fn handle_check(config: &Config, has_api_key: bool) {
    println!("=== PDF Harvester Configuration ===\n");

    println!("User Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nSearch:");
    println!("  Endpoint: {}", config.search.endpoint);
    println!("  Query suffix: {}", config.search.query_suffix);
    println!(
        "  API key: {}",
        if has_api_key { "configured" } else { "missing" }
    );

    println!("\nTimeouts:");
    println!("  Search: {}s", config.timeouts.search_secs);
    println!("  Search downloads: {}s", config.timeouts.search_download_secs);
    println!("  Direct downloads: {}s", config.timeouts.direct_download_secs);
    println!("  Site pages: {}s", config.timeouts.page_secs);

    println!("\nStorage:");
    println!("  Root: {}", config.storage.root_dir);

    println!("\nServer:");
    println!("  {}:{}", config.server.host, config.server.port);

    println!(
        "\nCrawl Sites ({}, max {} results):",
        config.sites.len(),
        config.scrape.max_results
    );
    for site in &config.sites {
        println!("  - {} ({})", site.name, site.url);
    }

    println!("\n✓ Configuration is valid");
    if !has_api_key {
        println!("! No search API key: extract and bulk will fail (set {})", API_KEY_ENV);
    }
}
