//! Head tag generation.
//!
//! The render entry normally reports the tags its head manager collected.
//! When it reports none, the tags are derived from the route's SEO record so
//! that live and pre-rendered pages carry the same metadata.

use wayfarer_ssr_core::{script_safe_json, HeadData, HeadTag};

use super::types::SeoRecord;

/// Head data derived from an SEO record.
pub fn seo_head(seo: &SeoRecord) -> HeadData {
    let mut head = HeadData {
        title: seo.title.clone(),
        ..Default::default()
    };

    let named = [
        ("description", &seo.description),
        ("keywords", &seo.keywords),
    ];
    for (name, value) in named {
        if let Some(content) = value {
            head.meta
                .push(HeadTag::from_pairs([("name", name), ("content", content.as_str())]));
        }
    }

    let og_title = seo.og_title.as_ref().or(seo.title.as_ref());
    let og_description = seo.og_description.as_ref().or(seo.description.as_ref());
    let open_graph = [
        ("og:title", og_title),
        ("og:description", og_description),
        ("og:image", seo.og_image.as_ref()),
        ("og:type", seo.og_type.as_ref()),
        ("og:url", seo.canonical_url.as_ref()),
    ];
    for (property, value) in open_graph {
        if let Some(content) = value {
            head.meta.push(HeadTag::from_pairs([
                ("property", property),
                ("content", content.as_str()),
            ]));
        }
    }

    if let Some(href) = &seo.canonical_url {
        head.link
            .push(HeadTag::from_pairs([("rel", "canonical"), ("href", href.as_str())]));
    }

    if let Some(data) = seo.structured_data.as_ref().filter(|d| !d.is_null()) {
        // A JSON column always re-serializes; on failure the tag is left out
        if let Ok(json) = script_safe_json(data) {
            head.script
                .push(HeadTag::from_pairs([("type", "application/ld+json")]).with_content(json));
        }
    }

    head
}

/// Head tags for a page: the rendered head when present, else the SEO fallback.
pub fn head_tags(rendered: &HeadData, seo: Option<&SeoRecord>) -> String {
    if !rendered.is_empty() {
        return rendered.to_html();
    }
    seo.map(|seo| seo_head(seo).to_html()).unwrap_or_default()
}
