//! Test doubles shared by the unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use wayfarer_core::page::{BlogPostRecord, PackageRecord, PagePayload, SeoRecord};
use wayfarer_core::storage::{ContentRepository, RepositoryError, Result};
use wayfarer_ssr::{RenderOutput, SsrError};

use crate::pipeline::{RenderPipeline, Renderer};
use crate::resolver::Resolver;
use crate::template::TemplateStore;

pub const TEMPLATE: &str = "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<!--ssr-head-->\n</head>\n<body><div id=\"root\"><!--ssr-outlet--></div></body>\n</html>\n";

/// Renders `<h1>Rendered {route}</h1>` and reports no head data.
pub struct StubRenderer;

#[async_trait]
impl Renderer for StubRenderer {
    async fn render(
        &self,
        route: &str,
        _payload: &PagePayload,
    ) -> std::result::Result<RenderOutput, SsrError> {
        Ok(RenderOutput {
            html: format!("<h1>Rendered {route}</h1>"),
            head: Default::default(),
        })
    }
}

/// Fails every render the way a throwing render entry does.
pub struct FailingRenderer;

#[async_trait]
impl Renderer for FailingRenderer {
    async fn render(
        &self,
        _route: &str,
        _payload: &PagePayload,
    ) -> std::result::Result<RenderOutput, SsrError> {
        Err(SsrError::JsExecution(
            "Error: <Boom> component exploded\n    at render (/srv/site/dist/server/entry-server.js:12:7)"
                .to_string(),
        ))
    }
}

/// Repository whose every call fails like an unreachable database.
pub struct FailingRepository;

fn unreachable_backend<T>() -> Result<T> {
    Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
}

#[async_trait]
impl ContentRepository for FailingRepository {
    async fn find_seo(&self, _route: &str) -> Result<Option<SeoRecord>> {
        unreachable_backend()
    }

    async fn find_package(&self, _slug: &str) -> Result<Option<PackageRecord>> {
        unreachable_backend()
    }

    async fn find_blog_post(&self, _slug: &str) -> Result<Option<BlogPostRecord>> {
        unreachable_backend()
    }

    async fn list_package_slugs(&self) -> Result<Vec<String>> {
        unreachable_backend()
    }

    async fn list_blog_post_slugs(&self) -> Result<Vec<String>> {
        unreachable_backend()
    }
}

pub fn pipeline(
    repo: impl ContentRepository + 'static,
    renderer: impl Renderer + 'static,
) -> RenderPipeline {
    RenderPipeline::new(
        TemplateStore::fixed(TEMPLATE),
        Resolver::new(Arc::new(repo)),
        Arc::new(renderer),
    )
}
