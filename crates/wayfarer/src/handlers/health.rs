//! Service routes used by the process supervisor.
//!
//! `/livez` answers as soon as the listener is up. `/healthz` reports render
//! worker counters without rendering. `/readyz` renders the home route once and
//! is the only check that proves the server entry still executes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfarer_ssr::sanitize_error;

use crate::state::AppState;

fn renderer_unavailable(state: &AppState) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "healthy": false,
            "mode": state.mode.node_env(),
            "error": "Renderer not started"
        })),
    )
        .into_response()
}

/// GET /livez
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - worker counters and whether the entry is re-read per render.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    let Some(pool) = &state.ssr_pool else {
        return renderer_unavailable(&state);
    };

    (StatusCode::OK, Json(pool.stats())).into_response()
}

/// GET /readyz - one render of the home route on a worker.
///
/// 503 when the entry throws, times out, or the workers are saturated.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    let Some(pool) = &state.ssr_pool else {
        return renderer_unavailable(&state);
    };

    match pool.health_check().await {
        Ok(status) if status.healthy => (StatusCode::OK, Json(status)).into_response(),
        Ok(status) => (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "healthy": false,
                "mode": state.mode.node_env(),
                "error": sanitize_error(&e)
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Mode;
    use crate::storage::InMemoryRepository;
    use crate::testing::{pipeline, StubRenderer};

    async fn call(route: &str) -> (StatusCode, serde_json::Value) {
        let state = AppState::new(
            Arc::new(pipeline(InMemoryRepository::new(), StubRenderer)),
            Mode::Development,
        );
        let app = Router::new()
            .route("/healthz", get(healthz))
            .route("/readyz", get(readyz))
            .with_state(state);

        let response = app
            .oneshot(Request::builder().uri(route).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_checks_fail_without_renderer() {
        for route in ["/healthz", "/readyz"] {
            let (status, body) = call(route).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{route}");
            assert_eq!(body["healthy"], false);
            assert_eq!(body["mode"], "development");
        }
    }

    #[tokio::test]
    async fn test_livez_is_unconditional() {
        assert_eq!(livez().await, StatusCode::OK);
    }
}
