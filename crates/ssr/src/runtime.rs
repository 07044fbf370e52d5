//! JsRuntime execution for a server render.
//!
//! This module contains the impure side-effect code that executes
//! the render entry using deno_core's JsRuntime. The entry reports its
//! output through two ops:
//!
//! - `Deno.core.ops.op_set_html(html)` with the rendered fragment
//! - `Deno.core.ops.op_set_head(json)` with the collected head tags (optional)

use std::cell::RefCell;

use deno_core::{extension, op2, JsRuntime, RuntimeOptions};
use wayfarer_ssr_core::{generate_polyfills, HeadData, RenderOutput};

use crate::error::{Result, SsrError};
use crate::provider::RenderEntry;
use crate::stack::{describe_core_error, describe_js_error};

thread_local! {
    /// Rendered HTML reported by the entry.
    static RENDERED_HTML: RefCell<Option<String>> = const { RefCell::new(None) };
    /// Head data JSON reported by the entry.
    static RENDERED_HEAD: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[op2(fast)]
fn op_set_html(#[string] html: String) {
    RENDERED_HTML.with(|cell| {
        *cell.borrow_mut() = Some(html);
    });
}

#[op2(fast)]
fn op_set_head(#[string] head_json: String) {
    RENDERED_HEAD.with(|cell| {
        *cell.borrow_mut() = Some(head_json);
    });
}

extension!(wayfarer_render_ext, ops = [op_set_html, op_set_head]);

/// Execute the render entry and return the HTML fragment and head data.
///
/// **MUST be called from a dedicated thread** - `JsRuntime` is not `Send`.
pub async fn render(entry: &RenderEntry, config_json: &str, node_env: &str) -> Result<RenderOutput> {
    clear_render_state();

    let polyfills = generate_polyfills(config_json, node_env).map_err(SsrError::Core)?;

    let mut runtime = JsRuntime::new(RuntimeOptions {
        extensions: vec![wayfarer_render_ext::init()],
        ..Default::default()
    });

    runtime
        .execute_script("<polyfills>", polyfills)
        .map_err(|e| SsrError::JsExecution(e.to_string()))?;

    // Named after the entry file so stack frames point at it
    runtime
        .execute_script(entry.name.clone(), entry.code.to_string())
        .map_err(|e| SsrError::JsExecution(describe_js_error(&e, entry)))?;

    // Run event loop to completion (handles async rendering)
    runtime
        .run_event_loop(Default::default())
        .await
        .map_err(|e| SsrError::JsExecution(describe_core_error(&e, entry)))?;

    let html = RENDERED_HTML
        .with(|cell| cell.borrow_mut().take())
        .ok_or(SsrError::NoHtmlRendered)?;

    let head = match RENDERED_HEAD.with(|cell| cell.borrow_mut().take()) {
        Some(json) => HeadData::from_json(&json)?,
        None => HeadData::default(),
    };

    Ok(RenderOutput { html, head })
}

/// Clear thread-local render output left over from a previous render.
fn clear_render_state() {
    RENDERED_HTML.with(|cell| *cell.borrow_mut() = None);
    RENDERED_HEAD.with(|cell| *cell.borrow_mut() = None);
}
