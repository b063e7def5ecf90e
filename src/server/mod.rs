//! HTTP service exposing the acquisition pipeline.
//!
//! Four JSON endpoints map onto pipeline operations:
//! - `POST /api/extract` - search-backed run for one topic
//! - `POST /api/scrape` - site crawl returning candidate links only
//! - `POST /api/download` - direct download of given URLs
//! - `POST /api/bulk` - batch of search-backed runs

mod handlers;
mod routes;

pub use handlers::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::acquire::Acquirer;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub acquirer: Arc<Acquirer>,
}

impl AppState {
    pub fn new(acquirer: Acquirer) -> Self {
        Self {
            acquirer: Arc::new(acquirer),
        }
    }
}

/// Start the web server.
///
/// Requests are served concurrently, but each pipeline run stays sequential
/// inside. Concurrent runs for the same topic share a folder without locking.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
