//! Embedded web client.
//!
//! The upload UI is a single self-contained HTML page compiled into the
//! binary, so the server runs from a bare binary with no asset directory.

use axum::response::{Html, IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "web/"]
#[include = "*.html"]
struct WebAssets;

/// Serve the upload UI.
pub async fn handle_index() -> Response {
    match WebAssets::get("index.html") {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => crate::error::ApiError::NotFound.into_response(),
    }
}
