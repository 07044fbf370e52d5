//! In-memory repository implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use wayfarer_core::page::{BlogPostRecord, PackageRecord, SeoRecord};
use wayfarer_core::storage::{ContentRepository, RepositoryError, Result};

/// Content file layout, keyed like the database tables.
#[derive(Debug, Default, Deserialize)]
pub struct ContentFixture {
    #[serde(default)]
    pub seo_metadata: Vec<SeoRecord>,
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPostRecord>,
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    seo: Arc<RwLock<Vec<SeoRecord>>>,
    packages: Arc<RwLock<Vec<PackageRecord>>>,
    blog_posts: Arc<RwLock<Vec<BlogPostRecord>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: ContentFixture) -> Self {
        Self {
            seo: Arc::new(RwLock::new(fixture.seo_metadata)),
            packages: Arc::new(RwLock::new(fixture.packages)),
            blog_posts: Arc::new(RwLock::new(fixture.blog_posts)),
        }
    }

    /// Loads a JSON content file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConnectionFailed(format!("{}: {e}", path.display()))
        })?;
        let fixture: ContentFixture = serde_json::from_str(&content)
            .map_err(|e| RepositoryError::Serialization(format!("{}: {e}", path.display())))?;

        tracing::info!(
            fixture = %path.display(),
            seo = fixture.seo_metadata.len(),
            packages = fixture.packages.len(),
            blog_posts = fixture.blog_posts.len(),
            "Content fixture loaded"
        );

        Ok(Self::from_fixture(fixture))
    }

    pub async fn insert_seo(&self, record: SeoRecord) {
        self.seo.write().await.push(record);
    }

    pub async fn insert_package(&self, record: PackageRecord) {
        self.packages.write().await.push(record);
    }

    pub async fn insert_blog_post(&self, record: BlogPostRecord) {
        self.blog_posts.write().await.push(record);
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn find_seo(&self, route: &str) -> Result<Option<SeoRecord>> {
        let seo = self.seo.read().await;
        let mut matches = seo
            .iter()
            .filter(|record| record.is_active && record.page_path == route);

        let first = matches.next().cloned();
        let rest = matches.count();
        if rest > 0 {
            return Err(RepositoryError::Ambiguous {
                entity_type: "SeoRecord",
                key: route.to_string(),
                count: rest + 1,
            });
        }
        Ok(first)
    }

    async fn find_package(&self, slug: &str) -> Result<Option<PackageRecord>> {
        let packages = self.packages.read().await;
        Ok(packages.iter().find(|p| p.slug == slug).cloned())
    }

    async fn find_blog_post(&self, slug: &str) -> Result<Option<BlogPostRecord>> {
        let posts = self.blog_posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_package_slugs(&self) -> Result<Vec<String>> {
        let packages = self.packages.read().await;
        Ok(packages.iter().map(|p| p.slug.clone()).collect())
    }

    async fn list_blog_post_slugs(&self) -> Result<Vec<String>> {
        let posts = self.blog_posts.read().await;
        Ok(posts.iter().map(|p| p.slug.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seo(path: &str, title: &str, is_active: bool) -> SeoRecord {
        SeoRecord {
            page_path: path.to_string(),
            title: Some(title.to_string()),
            is_active,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_find_seo_ignores_inactive_rows() {
        let repo = InMemoryRepository::new();
        repo.insert_seo(seo("/about", "Old", false)).await;
        repo.insert_seo(seo("/about", "About", true)).await;

        let found = repo.find_seo("/about").await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("About"));
        assert!(repo.find_seo("/contact").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_seo_duplicate_active_rows() {
        let repo = InMemoryRepository::new();
        repo.insert_seo(seo("/about", "A", true)).await;
        repo.insert_seo(seo("/about", "B", true)).await;

        assert!(matches!(
            repo.find_seo("/about").await,
            Err(RepositoryError::Ambiguous { count: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_fixture_round_trip() {
        let fixture: ContentFixture = serde_json::from_value(serde_json::json!({
            "packages": [{ "slug": "bali-retreat", "title": "Bali", "nights": 7 }],
            "blog_posts": [{ "slug": "packing-list" }]
        }))
        .unwrap();
        let repo = InMemoryRepository::from_fixture(fixture);

        assert_eq!(repo.list_package_slugs().await.unwrap(), vec!["bali-retreat"]);
        assert_eq!(repo.list_blog_post_slugs().await.unwrap(), vec!["packing-list"]);

        let package = repo.find_package("bali-retreat").await.unwrap().unwrap();
        assert_eq!(package.extra["nights"], 7);
        assert!(repo.find_blog_post("missing").await.unwrap().is_none());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            InMemoryRepository::load(&path),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
