//! HTML composition.
//!
//! The template carries three markers:
//!
//! - `<!--ssr-outlet-->` receives the rendered fragment
//! - `<!--ssr-head-->` receives the head tags (falls back to just before `</head>`)
//! - `</head>` is preceded by the hydration state script
//!
//! Markers are located in the template only, so rendered content that happens
//! to contain a marker is never substituted again. Each marker is used at most
//! once; a missing marker skips that step.

use std::borrow::Cow;

use thiserror::Error;
use wayfarer_ssr_core::script_safe_json;

use super::types::PagePayload;

pub const OUTLET_MARKER: &str = "<!--ssr-outlet-->";
pub const HEAD_MARKER: &str = "<!--ssr-head-->";
pub const HEAD_CLOSE: &str = "</head>";

/// Global the client bundle reads its initial state from.
pub const STATE_GLOBAL: &str = "window.__STATIC_PROPS__";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Failed to serialize page payload: {0}")]
    Serialization(String),
}

/// Build the `<script>` element carrying the serialized payload.
pub fn state_script(payload: &PagePayload) -> Result<String, ComposeError> {
    let json =
        script_safe_json(payload).map_err(|e| ComposeError::Serialization(e.to_string()))?;
    Ok(format!("<script>{STATE_GLOBAL} = {json};</script>"))
}

/// Compose a full document for a rendered route.
pub fn compose(
    template: &str,
    rendered: &str,
    head_tags: &str,
    payload: &PagePayload,
) -> Result<String, ComposeError> {
    let script = state_script(payload)?;
    Ok(compose_with_state(template, rendered, head_tags, &script))
}

/// Compose with an already-built state script.
pub fn compose_with_state(
    template: &str,
    rendered: &str,
    head_tags: &str,
    state_script: &str,
) -> String {
    // (start, end, replacement), all offsets into `template`
    let mut edits: Vec<(usize, usize, Cow<'_, str>)> = Vec::with_capacity(3);

    if let Some(at) = template.find(OUTLET_MARKER) {
        edits.push((at, at + OUTLET_MARKER.len(), Cow::Borrowed(rendered)));
    }

    let head_close = template.find(HEAD_CLOSE);

    if let Some(at) = template.find(HEAD_MARKER) {
        edits.push((at, at + HEAD_MARKER.len(), Cow::Borrowed(head_tags)));
    } else if let Some(at) = head_close {
        edits.push((at, at, Cow::Owned(format!("{head_tags}\n"))));
    }

    if let Some(at) = head_close {
        edits.push((at, at, Cow::Owned(format!("{state_script}\n"))));
    }

    // Stable sort keeps head tags ahead of the state script at `</head>`
    edits.sort_by_key(|(start, _, _)| *start);

    let extra: usize = edits.iter().map(|(_, _, text)| text.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut cursor = 0;
    for (start, end, text) in edits {
        out.push_str(&template[cursor..start]);
        out.push_str(&text);
        cursor = end;
    }
    out.push_str(&template[cursor..]);
    out
}
