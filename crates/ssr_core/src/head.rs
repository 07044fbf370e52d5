//! Head metadata returned by a render.
//!
//! The render entry reports the tags its head manager collected as JSON; the
//! result is an immutable [`HeadData`] value handed to the composer together
//! with the rendered HTML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SsrCoreError};
use crate::escape::{escape_html, escape_inline_script};

/// A single `<meta>`, `<link>` or `<script>` tag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadTag {
    /// Inline content (only rendered for scripts).
    #[serde(
        default,
        rename = "innerHTML",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    /// Tag attributes. `true` renders as a bare attribute, `false`/`null` are omitted.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, serde_json::Value>,
}

impl HeadTag {
    /// Build a tag from string attribute pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            content: None,
            attrs: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
        }
    }

    /// Attach inline content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn render_attrs(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.attrs {
            if !is_valid_attr_name(key) {
                continue;
            }
            match value {
                serde_json::Value::Null | serde_json::Value::Bool(false) => {}
                serde_json::Value::Bool(true) => {
                    out.push(' ');
                    out.push_str(key);
                }
                serde_json::Value::String(s) => {
                    out.push_str(&format!(" {key}=\"{}\"", escape_html(s)));
                }
                other => {
                    out.push_str(&format!(" {key}=\"{}\"", escape_html(&other.to_string())));
                }
            }
        }
        out
    }
}

fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Head tags collected during one render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta: Vec<HeadTag>,
    #[serde(default)]
    pub link: Vec<HeadTag>,
    #[serde(default)]
    pub script: Vec<HeadTag>,
}

impl HeadData {
    /// Parse head data reported by the render entry.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SsrCoreError::InvalidHead(e.to_string()))
    }

    /// True when no tag was collected.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.meta.is_empty() && self.link.is_empty() && self.script.is_empty()
    }

    /// Render the tags as HTML, one per line.
    pub fn to_html(&self) -> String {
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            lines.push(format!("<title>{}</title>", escape_html(title)));
        }
        for tag in &self.meta {
            lines.push(format!("<meta{}>", tag.render_attrs()));
        }
        for tag in &self.link {
            lines.push(format!("<link{}>", tag.render_attrs()));
        }
        for tag in &self.script {
            let content = tag
                .content
                .as_deref()
                .map(escape_inline_script)
                .unwrap_or_default();
            lines.push(format!("<script{}>{content}</script>", tag.render_attrs()));
        }

        lines.join("\n")
    }
}

/// The result of rendering one route.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOutput {
    /// HTML fragment for the outlet marker.
    pub html: String,
    /// Head tags collected while rendering.
    pub head: HeadData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full() {
        let head = HeadData::from_json(
            r#"{
                "title": "Bali Retreat",
                "meta": [{"name": "description", "content": "Seven nights"}],
                "link": [{"rel": "canonical", "href": "https://example.com/packages/bali"}],
                "script": [{"type": "application/ld+json", "innerHTML": "{\"@type\":\"Trip\"}"}]
            }"#,
        )
        .unwrap();

        assert_eq!(head.title.as_deref(), Some("Bali Retreat"));
        assert_eq!(head.meta.len(), 1);
        assert_eq!(head.script[0].content.as_deref(), Some(r#"{"@type":"Trip"}"#));
        assert!(!head.is_empty());
    }

    #[test]
    fn test_from_json_empty_object() {
        let head = HeadData::from_json("{}").unwrap();
        assert!(head.is_empty());
        assert_eq!(head.to_html(), "");
    }

    #[test]
    fn test_from_json_invalid() {
        let result = HeadData::from_json("not json");
        assert!(matches!(result, Err(SsrCoreError::InvalidHead(_))));
    }

    #[test]
    fn test_to_html_escapes_attributes_and_title() {
        let head = HeadData {
            title: Some("Sun & <Sea>".to_string()),
            meta: vec![HeadTag::from_pairs([
                ("name", "description"),
                ("content", "\"quoted\""),
            ])],
            ..Default::default()
        };

        let html = head.to_html();
        assert!(html.contains("<title>Sun &amp; &lt;Sea&gt;</title>"));
        assert!(html.contains(r#"<meta content="&quot;quoted&quot;" name="description">"#));
    }

    #[test]
    fn test_to_html_boolean_and_invalid_attributes() {
        let mut attrs = BTreeMap::new();
        attrs.insert("src".to_string(), serde_json::json!("/app.js"));
        attrs.insert("async".to_string(), serde_json::json!(true));
        attrs.insert("defer".to_string(), serde_json::json!(false));
        attrs.insert("onload\"x".to_string(), serde_json::json!("bad"));
        let head = HeadData {
            script: vec![HeadTag {
                content: None,
                attrs,
            }],
            ..Default::default()
        };

        assert_eq!(head.to_html(), r#"<script async src="/app.js"></script>"#);
    }

    #[test]
    fn test_inline_script_cannot_close_element() {
        let head = HeadData {
            script: vec![HeadTag::default().with_content("'</script><b>'")],
            ..Default::default()
        };
        assert_eq!(head.to_html(), "<script>'<\\/script><b>'</script>");
    }
}
