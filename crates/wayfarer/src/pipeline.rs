//! Route rendering: resolve, render, compose.
//!
//! The server's catch-all handler and the pre-renderer share one
//! [`RenderPipeline`], so a live page and its static snapshot are built the
//! same way.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use wayfarer_core::page::{compose, head_tags, ComposeError, PagePayload};
use wayfarer_ssr::{sanitize_error, RenderOutput, SsrConfig, SsrError, SsrPool};

use crate::resolver::Resolver;
use crate::template::{TemplateError, TemplateStore};

/// Executes the render entry for a route.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, route: &str, payload: &PagePayload) -> Result<RenderOutput, SsrError>;
}

#[async_trait]
impl Renderer for SsrPool {
    async fn render(&self, route: &str, payload: &PagePayload) -> Result<RenderOutput, SsrError> {
        let config = SsrConfig::new(route, payload.to_value())?;
        SsrPool::render(self, config).await
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Render(#[from] SsrError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl PipelineError {
    /// Message safe to show to visitors.
    pub fn public_message(&self) -> String {
        match self {
            Self::Render(e) => sanitize_error(e),
            Self::Template(_) | Self::Compose(_) => "Internal server error".to_string(),
        }
    }
}

pub struct RenderPipeline {
    templates: TemplateStore,
    resolver: Resolver,
    renderer: Arc<dyn Renderer>,
}

impl RenderPipeline {
    pub fn new(templates: TemplateStore, resolver: Resolver, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            templates,
            resolver,
            renderer,
        }
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Full HTML document for a normalized route.
    pub async fn render_page(&self, route: &str) -> Result<String, PipelineError> {
        let template = self.templates.get().await?;
        let payload = self.resolver.resolve(route).await;

        let output = self.renderer.render(route, &payload).await?;
        let head = head_tags(&output.head, payload.seo.as_ref());

        tracing::debug!(
            route,
            html_bytes = output.html.len(),
            head_from_render = !output.head.is_empty(),
            "Route rendered"
        );

        Ok(compose(&template, &output.html, &head, &payload)?)
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::page::SeoRecord;

    use super::*;
    use crate::storage::InMemoryRepository;
    use crate::testing::{pipeline, FailingRenderer, StubRenderer, TEMPLATE};

    #[tokio::test]
    async fn test_home_page_carries_fragment_and_payload() {
        let pipeline = pipeline(InMemoryRepository::new(), StubRenderer);
        let html = pipeline.render_page("/").await.unwrap();

        assert!(html.contains(r#"<div id="root"><h1>Rendered /</h1></div>"#));
        assert!(html.contains(
            r#"<script>window.__STATIC_PROPS__ = {"seo":null,"pageData":null,"route":"/"};</script>"#
        ));
        assert!(!html.contains("<!--ssr-outlet-->"));
    }

    #[tokio::test]
    async fn test_seo_record_fills_head_when_render_reports_none() {
        let repo = InMemoryRepository::new();
        repo.insert_seo(SeoRecord {
            page_path: "/about".to_string(),
            title: Some("About Wayfarer".to_string()),
            description: Some("Small-group journeys".to_string()),
            is_active: true,
            ..Default::default()
        })
        .await;

        let html = pipeline(repo, StubRenderer).render_page("/about").await.unwrap();

        assert!(html.contains("<title>About Wayfarer</title>"));
        assert!(html.contains(r#"content="Small-group journeys""#));
    }

    #[tokio::test]
    async fn test_render_failure_propagates() {
        let pipeline = pipeline(InMemoryRepository::new(), FailingRenderer);
        let err = pipeline.render_page("/").await.unwrap_err();

        assert!(matches!(err, PipelineError::Render(SsrError::JsExecution(_))));
        assert_eq!(err.public_message(), "Render failed");
        assert!(err.to_string().contains("entry-server.js"));
    }

    #[tokio::test]
    async fn test_template_is_not_rescanned_for_rendered_markers() {
        assert!(TEMPLATE.contains("<!--ssr-head-->"));

        let html = pipeline(InMemoryRepository::new(), StubRenderer)
            .render_page("/<!--ssr-head-->")
            .await
            .unwrap();
        assert!(html.contains("<h1>Rendered /<!--ssr-head--></h1>"));
    }
}
