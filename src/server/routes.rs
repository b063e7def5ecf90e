//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/extract", post(handlers::extract))
        .route("/api/scrape", post(handlers::scrape))
        .route("/api/download", post(handlers::download))
        .route("/api/bulk", post(handlers::bulk))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
