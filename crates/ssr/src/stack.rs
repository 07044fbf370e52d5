//! Error text for exceptions thrown by the render entry.
//!
//! When the entry comes with a source map, frames that point into the bundle
//! are rewritten to original source positions before the text is reported.

use deno_core::error::{CoreError, CoreErrorKind, JsError, JsStackFrame};
use sourcemap::SourceMap;

use crate::provider::RenderEntry;

/// Describe a script error thrown while executing `entry`.
pub fn describe_js_error(error: &JsError, entry: &RenderEntry) -> String {
    let Some(map) = entry.source_map.as_deref() else {
        return error.to_string();
    };

    let mut text = error.exception_message.clone();
    for frame in &error.frames {
        text.push_str("\n    at ");
        text.push_str(&format_frame(frame, &entry.name, map));
    }
    text
}

/// Describe an error surfaced by the event loop.
pub fn describe_core_error(error: &CoreError, entry: &RenderEntry) -> String {
    match &*error.0 {
        CoreErrorKind::Js(js) => describe_js_error(js, entry),
        other => other.to_string(),
    }
}

fn format_frame(frame: &JsStackFrame, entry_name: &str, map: &SourceMap) -> String {
    let location = match (&frame.file_name, frame.line_number, frame.column_number) {
        (Some(file), Some(line), Some(column)) if file == entry_name => {
            original_position(map, line, column)
                .unwrap_or_else(|| format!("{file}:{line}:{column}"))
        }
        (Some(file), Some(line), Some(column)) => format!("{file}:{line}:{column}"),
        (Some(file), _, _) => file.clone(),
        _ => "<anonymous>".to_string(),
    };

    match &frame.function_name {
        Some(name) if !name.is_empty() => format!("{name} ({location})"),
        _ => location,
    }
}

/// Map a 1-based bundle position to `source:line:column` in the original file.
fn original_position(map: &SourceMap, line: i64, column: i64) -> Option<String> {
    let line = u32::try_from(line.checked_sub(1)?).ok()?;
    let column = u32::try_from(column.checked_sub(1)?).ok()?;

    let token = map.lookup_token(line, column)?;
    if token.get_dst_line() != line {
        return None;
    }

    Some(format!(
        "{}:{}:{}",
        token.get_source()?,
        token.get_src_line() + 1,
        token.get_src_col() + 1
    ))
}
