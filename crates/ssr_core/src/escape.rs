//! Escaping helpers for text embedded in generated HTML.

use serde::Serialize;

use crate::error::{Result, SsrCoreError};

/// Escape text for use in HTML element content or a double-quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a value to JSON that is safe to place inside a `<script>` element.
///
/// `<`, `>` and `&` are written as unicode escapes so the text can never close
/// the surrounding element or open a comment, and the JS line terminators
/// U+2028/U+2029 are escaped as well. The result is still valid JSON that
/// parses back to the same value.
pub fn script_safe_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json =
        serde_json::to_string(value).map_err(|e| SsrCoreError::Serialization(e.to_string()))?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Neutralise closing tags inside inline script content.
///
/// `</script` becomes `<\/script`, which JS reads identically.
pub fn escape_inline_script(content: &str) -> String {
    content.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_script_safe_json_blocks_script_breakout() {
        let value = serde_json::json!({"title": "</script><script>alert(1)</script>"});
        let json = script_safe_json(&value).unwrap();
        assert!(!json.contains("</script>"));
        assert!(!json.contains('<'));
        assert!(json.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_script_safe_json_parses_back() {
        let value = serde_json::json!({
            "text": "a < b && c > d <!-- x -->",
            "separators": "line\u{2028}para\u{2029}end",
            "nested": [1, 2, {"k": null}]
        });
        let json = script_safe_json(&value).unwrap();
        assert!(!json.contains('\u{2028}'));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_escape_inline_script() {
        assert_eq!(
            escape_inline_script("var s = '</script>';"),
            "var s = '<\\/script>';"
        );
    }
}
