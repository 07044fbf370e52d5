//! Development-only handlers for browser auto-reload.
//!
//! Only routed when the server runs in development mode.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind, Debouncer};

use crate::state::AppState;

/// POST /_dev/reload - Tell connected browsers to reload.
///
/// For build tools that know when a rebuild finished. The template and the
/// render entry are read per request in development, so nothing is swapped
/// server-side.
#[axum::debug_handler]
pub async fn reload(State(state): State<AppState>) -> impl IntoResponse {
    state.signal_dev_reload();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true
        })),
    )
}

/// GET /_dev/events - SSE endpoint for dev reload signals.
///
/// - "connected" event: sent once when the stream opens
/// - "reload" event: Signals browser to refresh the page
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let mut reload_rx = state.subscribe_dev_reload();
    let mut shutdown_rx = state.subscribe_shutdown();

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("connected").data("{}"));

        loop {
            tokio::select! {
                Ok(()) = reload_rx.recv() => {
                    yield Ok(Event::default().event("reload").data("{}"));
                }
                // Shutdown signal - close connection
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Watch the template and render entry, broadcasting a reload on change.
///
/// Parent directories are watched because bundlers replace output files
/// rather than write them in place. The returned debouncer must be kept
/// alive for as long as the watch should run.
pub fn watch_for_reload(
    paths: &[PathBuf],
    state: AppState,
) -> notify::Result<Debouncer<RecommendedWatcher>> {
    let watched: Vec<PathBuf> = paths.iter().map(|p| absolute(p)).collect();
    let targets = watched.clone();

    let mut debouncer = new_debouncer(
        Duration::from_millis(300),
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                let changed = events.iter().any(|e| {
                    matches!(e.kind, DebouncedEventKind::Any) && targets.contains(&e.path)
                });
                if changed {
                    tracing::info!("Source changed, reloading browsers");
                    state.signal_dev_reload();
                }
            }
            Err(e) => tracing::warn!(error = %e, "File watch error"),
        },
    )?;

    for path in &watched {
        let Some(dir) = path.parent().filter(|d| d.is_dir()) else {
            tracing::warn!(path = %path.display(), "Not watching, directory does not exist");
            continue;
        };
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %path.display(), "Watching for changes");
    }

    Ok(debouncer)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
