//! Route data resolution.
//!
//! Turns a route into the [`PagePayload`] the page renders and hydrates from.
//! Lookups never fail the request: any error degrades that field to `null`.

use std::sync::Arc;

use wayfarer_core::page::{classify_route, PageData, PagePayload, RouteKind, SeoRecord};
use wayfarer_core::storage::ContentRepository;

#[derive(Clone)]
pub struct Resolver {
    repo: Arc<dyn ContentRepository>,
}

impl Resolver {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// Resolve the payload for a normalized route.
    ///
    /// The SEO lookup and the content lookup run concurrently.
    pub async fn resolve(&self, route: &str) -> PagePayload {
        let (seo, page_data) = tokio::join!(self.seo(route), self.page_data(route));
        PagePayload::new(route, seo, page_data)
    }

    async fn seo(&self, route: &str) -> Option<SeoRecord> {
        match self.repo.find_seo(route).await {
            Ok(seo) => seo,
            Err(e) => {
                tracing::warn!(route, error = %e, "SEO lookup failed");
                None
            }
        }
    }

    async fn page_data(&self, route: &str) -> Option<PageData> {
        let result = match classify_route(route) {
            RouteKind::Package { slug } => self
                .repo
                .find_package(slug)
                .await
                .map(|p| p.map(PageData::Package)),
            RouteKind::BlogPost { slug } => self
                .repo
                .find_blog_post(slug)
                .await
                .map(|p| p.map(PageData::BlogPost)),
            RouteKind::Static => return None,
        };

        match result {
            Ok(Some(data)) => Some(data),
            Ok(None) => {
                tracing::warn!(route, "No content record for route");
                None
            }
            Err(e) => {
                tracing::warn!(route, error = %e, "Content lookup failed");
                None
            }
        }
    }
}
