//! Catch-all page handler.
//!
//! Every GET that is not a static file or a service route lands here and is
//! rendered through the shared pipeline.

use axum::{
    extract::State,
    http::{header, Uri},
    response::{Html, IntoResponse, Response},
};
use wayfarer_core::page::normalize_route;

use super::AppError;
use crate::state::AppState;

/// GET /{*path} - Server-render a route.
pub async fn render_page(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    // Slugs are looked up decoded, the same way the pre-renderer sees them
    let path = urlencoding::decode_binary(uri.path().as_bytes());
    let route = normalize_route(&String::from_utf8_lossy(&path));

    let html = state
        .pipeline
        .render_page(&route)
        .await
        .map_err(|e| AppError::render(e, state.mode))?;

    Ok(([(header::CACHE_CONTROL, "no-cache")], Html(html)).into_response())
}
