//! Content queries: SEO metadata, packages and blog posts.

use async_trait::async_trait;
use serde::Deserialize;
use wayfarer_core::page::{BlogPostRecord, PackageRecord, SeoRecord};
use wayfarer_core::storage::{ContentRepository, RepositoryError};

use super::{SupabaseClient, BLOG_POSTS_TABLE, PACKAGES_TABLE, SEO_TABLE};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct SlugRow {
    slug: String,
}

impl SupabaseClient {
    /// Active SEO rows for an exact path (at most two are fetched).
    pub async fn seo_rows(&self, route: &str) -> Result<Vec<SeoRecord>> {
        self.select(
            SEO_TABLE,
            &[
                ("select", "*".to_string()),
                ("page_path", format!("eq.{route}")),
                ("is_active", "eq.true".to_string()),
                ("limit", "2".to_string()),
            ],
        )
        .await
    }

    /// First package with the slug.
    pub async fn package_by_slug(&self, slug: &str) -> Result<Option<PackageRecord>> {
        let rows: Vec<PackageRecord> = self.by_slug(PACKAGES_TABLE, slug).await?;
        Ok(rows.into_iter().next())
    }

    /// First blog post with the slug.
    pub async fn blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostRecord>> {
        let rows: Vec<BlogPostRecord> = self.by_slug(BLOG_POSTS_TABLE, slug).await?;
        Ok(rows.into_iter().next())
    }

    /// All slugs of a table, in one listing call.
    pub async fn slugs(&self, table: &str) -> Result<Vec<String>> {
        let rows: Vec<SlugRow> = self.select(table, &[("select", "slug".to_string())]).await?;
        Ok(rows.into_iter().map(|row| row.slug).collect())
    }

    async fn by_slug<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        slug: &str,
    ) -> Result<Vec<T>> {
        self.select(
            table,
            &[
                ("select", "*".to_string()),
                ("slug", format!("eq.{slug}")),
                ("limit", "1".to_string()),
            ],
        )
        .await
    }
}

#[async_trait]
impl ContentRepository for SupabaseClient {
    async fn find_seo(&self, route: &str) -> wayfarer_core::storage::Result<Option<SeoRecord>> {
        let mut rows = self.seo_rows(route).await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            count => Err(RepositoryError::Ambiguous {
                entity_type: "SeoRecord",
                key: route.to_string(),
                count,
            }),
        }
    }

    async fn find_package(
        &self,
        slug: &str,
    ) -> wayfarer_core::storage::Result<Option<PackageRecord>> {
        Ok(self.package_by_slug(slug).await?)
    }

    async fn find_blog_post(
        &self,
        slug: &str,
    ) -> wayfarer_core::storage::Result<Option<BlogPostRecord>> {
        Ok(self.blog_post_by_slug(slug).await?)
    }

    async fn list_package_slugs(&self) -> wayfarer_core::storage::Result<Vec<String>> {
        Ok(self.slugs(PACKAGES_TABLE).await?)
    }

    async fn list_blog_post_slugs(&self) -> wayfarer_core::storage::Result<Vec<String>> {
        Ok(self.slugs(BLOG_POSTS_TABLE).await?)
    }
}
