//! Content records and the per-route page payload.
//!
//! The hosted database owns the schema. Only the columns the server itself
//! reads are typed; every other column is kept in `extra` and serialized back
//! verbatim so the client sees the full row.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// SEO metadata for one route, looked up by exact path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoRecord {
    pub page_path: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub og_type: Option<String>,
    /// JSON-LD object emitted as `application/ld+json`.
    #[serde(default)]
    pub structured_data: Option<serde_json::Value>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A travel package, addressed by `/packages/{slug}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A blog post, addressed by `/blog/{slug}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPostRecord {
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Page-specific content for a dynamic route.
///
/// Serialized as the bare record, the route already tells the client which
/// kind it is.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageData {
    Package(PackageRecord),
    BlogPost(BlogPostRecord),
}

/// Data resolved for one route, serialized into the page for hydration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    pub seo: Option<SeoRecord>,
    pub page_data: Option<PageData>,
    pub route: String,
}

impl PagePayload {
    pub fn new(route: impl Into<String>, seo: Option<SeoRecord>, page_data: Option<PageData>) -> Self {
        Self {
            seo,
            page_data,
            route: route.into(),
        }
    }

    /// Payload with no metadata and no page data.
    pub fn empty(route: impl Into<String>) -> Self {
        Self::new(route, None, None)
    }

    /// Payload as a JSON value (the render entry input).
    pub fn to_value(&self) -> serde_json::Value {
        // Only strings, options and JSON maps: serialization cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_serializes_nulls() {
        let payload = PagePayload::empty("/");
        assert_eq!(
            payload.to_value(),
            serde_json::json!({ "seo": null, "pageData": null, "route": "/" })
        );
    }

    #[test]
    fn test_package_record_keeps_unknown_columns() {
        let row = serde_json::json!({
            "id": 7,
            "slug": "bali-retreat",
            "title": "Bali Retreat",
            "price": 1299.0,
            "highlights": ["Ubud", "Nusa Penida"]
        });
        let record: PackageRecord = serde_json::from_value(row.clone()).unwrap();

        assert_eq!(record.slug, "bali-retreat");
        assert_eq!(record.extra["price"], 1299.0);
        assert_eq!(serde_json::to_value(&record).unwrap(), row);
    }

    #[test]
    fn test_page_data_serializes_untagged() {
        let payload = PagePayload::new(
            "/blog/packing-list",
            None,
            Some(PageData::BlogPost(BlogPostRecord {
                slug: "packing-list".to_string(),
                title: Some("Packing list".to_string()),
                extra: Default::default(),
            })),
        );

        let value = payload.to_value();
        assert_eq!(value["pageData"]["slug"], "packing-list");
        assert_eq!(value["route"], "/blog/packing-list");
    }

    #[test]
    fn test_seo_record_defaults() {
        let record: SeoRecord = serde_json::from_value(serde_json::json!({
            "page_path": "/about"
        }))
        .unwrap();

        assert!(record.is_active);
        assert!(record.title.is_none());
        assert!(record.extra.is_empty());
    }
}
