//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::assets;
use crate::error::ApiError;
use crate::services::{OpRegistry, TransformPipeline};

/// Default cap on request bodies. Camera originals run tens of megabytes;
/// anything past this is rejected before it reaches a handler.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across all handlers.
///
/// Both members are read-only after startup; sharing is a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<OpRegistry>,
    pub pipeline: Arc<TransformPipeline>,
}

/// Create application state with the operation registries built.
pub fn create_app_state() -> AppState {
    let registry = Arc::new(OpRegistry::new());
    let pipeline = Arc::new(TransformPipeline::new(registry.clone()));

    AppState { registry, pipeline }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. The browser
/// client may be served from any origin, so CORS is wide open.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        // Upload API
        .route("/api/v1/uploadsingle", post(api::upload_single))
        .route("/api/v1/uploadmultiple", post(api::upload_multiple))
        // Browser upload UI
        .route("/", get(assets::handle_index))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Structured JSON for unmatched routes
        .fallback(handle_not_found)
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn handle_not_found() -> ApiError {
    ApiError::NotFound
}
