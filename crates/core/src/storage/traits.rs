use async_trait::async_trait;

use crate::page::{BlogPostRecord, PackageRecord, SeoRecord};

use super::Result;

/// Read access to the site content held by the hosted database.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Gets the active SEO record whose path equals `route` exactly.
    ///
    /// More than one active match is an error (`Ambiguous`).
    async fn find_seo(&self, route: &str) -> Result<Option<SeoRecord>>;

    /// Gets a package by slug.
    async fn find_package(&self, slug: &str) -> Result<Option<PackageRecord>>;

    /// Gets a blog post by slug.
    async fn find_blog_post(&self, slug: &str) -> Result<Option<BlogPostRecord>>;

    /// Lists the slugs of all packages in one call.
    async fn list_package_slugs(&self) -> Result<Vec<String>>;

    /// Lists the slugs of all blog posts in one call.
    async fn list_blog_post_slugs(&self) -> Result<Vec<String>>;
}
