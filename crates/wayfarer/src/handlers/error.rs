use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use wayfarer_ssr::escape_html;

use crate::config::Mode;
use crate::pipeline::PipelineError;

/// Application error type that wraps `anyhow::Error`.
///
/// Rendered as an HTML error page. The page shows `message`, which is the
/// full error chain in development and a sanitized summary in production.
pub struct AppError {
    error: anyhow::Error,
    message: String,
}

impl AppError {
    /// Error from a failed page render, worded for `mode`.
    pub fn render(error: PipelineError, mode: Mode) -> Self {
        let message = if mode.is_development() {
            error.to_string()
        } else {
            error.public_message()
        };

        Self {
            error: error.into(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.error, "Application error");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            error_page(&self.message),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            message: "Internal server error".to_string(),
        }
    }
}

fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Something went wrong</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
    <h1>Something went wrong</h1>
    <pre>{}</pre>
</body>
</html>"#,
        escape_html(message)
    )
}
