use std::path::Path;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    services::ServeDir, set_header::SetResponseHeader, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{dev, health, page::render_page},
    state::AppState,
};

/// Upper bound for any non-streaming request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the application router with all routes and middleware.
///
/// Requests are matched in this order: service routes, static files from
/// `static_dir`, then the page renderer for everything else.
pub fn create_app(state: AppState, static_dir: &Path) -> Router {
    let development = state.mode.is_development();

    let pages = get(render_page).with_state(state.clone());
    let files = ServeDir::new(static_dir)
        .append_index_html_on_directories(false)
        .fallback(pages);

    let mut router = Router::new()
        .route("/livez", get(health::livez))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz));

    if development {
        router = router.fallback_service(files);
    } else {
        // Hashed build output never changes
        let assets = SetResponseHeader::overriding(
            ServeDir::new(static_dir.join("assets")),
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
        let files = SetResponseHeader::if_not_present(
            files,
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        );

        router = router
            .nest_service("/assets", assets)
            .fallback_service(files);
    }

    let mut router = router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ));

    // Added after the timeout layer: the event stream stays open
    if development {
        router = router.merge(
            Router::new()
                .route("/_dev/events", get(dev::events))
                .route("/_dev/reload", post(dev::reload))
                .layer(TraceLayer::new_for_http()),
        );
    }

    router.with_state(state)
}
