//! Failures of a server render, from loading the entry to collecting output.

use thiserror::Error;
use wayfarer_ssr_core::SsrCoreError;

#[derive(Error, Debug)]
pub enum SsrError {
    /// Config, payload or head data rejected before or after execution.
    #[error("Core error: {0}")]
    Core(#[from] SsrCoreError),

    /// The server entry could not be read from disk.
    #[error("Failed to load render entry from {path}: {reason}")]
    EntryLoad { path: String, reason: String },

    /// The entry threw. Carries the message and the stack, source-mapped when
    /// a map was available.
    #[error("JavaScript execution error: {0}")]
    JsExecution(String),

    /// The entry ran to completion without calling `op_set_html`.
    #[error("Render entry produced no HTML")]
    NoHtmlRendered,

    #[error("Worker channel closed")]
    ChannelClosed,

    #[error("Render timeout after {0}ms")]
    Timeout(u64),

    /// Every worker queue is full.
    #[error("Service overloaded, retry after {retry_after_secs}s")]
    Overloaded { retry_after_secs: u32 },
}

pub type Result<T> = std::result::Result<T, SsrError>;

/// Text safe to show a visitor in production.
///
/// Stacks, file paths and payload details stay in the logs.
pub fn sanitize_error(error: &SsrError) -> String {
    match error {
        SsrError::Timeout(ms) => format!("Render timed out after {ms}ms"),
        SsrError::Overloaded { retry_after_secs } => {
            format!("Server busy, retry after {retry_after_secs}s")
        }
        SsrError::ChannelClosed => "Renderer unavailable".to_string(),
        SsrError::EntryLoad { .. } => "Server bundle unavailable".to_string(),
        SsrError::JsExecution(_) => "Render failed".to_string(),
        SsrError::NoHtmlRendered => "Render produced no output".to_string(),
        SsrError::Core(_) => "Page data rejected".to_string(),
    }
}
