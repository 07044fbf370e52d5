//! Batch pre-rendering of routes to static HTML files.

use std::path::{Path, PathBuf};

use wayfarer_core::page::{dynamic_routes, normalize_route, output_path};
use wayfarer_core::storage::ContentRepository;

use crate::pipeline::RenderPipeline;

/// A route that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFailure {
    pub route: String,
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct PrerenderReport {
    /// Files written, in route order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<RouteFailure>,
}

impl PrerenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Every route to pre-render: the static list followed by one route per
/// package and blog post.
///
/// Falls back to the home route alone when the content cannot be listed.
pub async fn enumerate_routes(
    repo: &dyn ContentRepository,
    static_routes: &[String],
) -> Vec<String> {
    let (packages, posts) = tokio::join!(repo.list_package_slugs(), repo.list_blog_post_slugs());

    let (packages, posts) = match (packages, posts) {
        (Ok(packages), Ok(posts)) => (packages, posts),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Failed to list content, pre-rendering the home page only");
            return vec!["/".to_string()];
        }
    };

    let dynamic = dynamic_routes(&packages, &posts);
    for route in &dynamic.skipped {
        tracing::warn!(route = %route, "Skipping content with an unusable slug");
    }

    let mut routes: Vec<String> = Vec::new();
    for route in static_routes
        .iter()
        .map(|r| normalize_route(r))
        .chain(dynamic.routes)
    {
        if !routes.contains(&route) {
            routes.push(route);
        }
    }

    tracing::info!(
        routes = routes.len(),
        packages = packages.len(),
        blog_posts = posts.len(),
        "Routes enumerated"
    );
    routes
}

/// Render each route in order and write it below `out_dir`.
///
/// A failing route is logged and recorded; the batch continues.
pub async fn prerender_all(
    pipeline: &RenderPipeline,
    routes: &[String],
    out_dir: &Path,
) -> PrerenderReport {
    let mut report = PrerenderReport::default();

    for route in routes {
        match prerender_route(pipeline, route, out_dir).await {
            Ok(path) => {
                tracing::info!(route = %route, file = %path.display(), "Pre-rendered");
                report.written.push(path);
            }
            Err(e) => {
                tracing::error!(route = %route, error = %e, "Failed to pre-render route");
                report.failures.push(RouteFailure {
                    route: route.clone(),
                    error: format!("{e:#}"),
                });
            }
        }
    }

    tracing::info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "Pre-render finished"
    );
    report
}

async fn prerender_route(
    pipeline: &RenderPipeline,
    route: &str,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = output_path(out_dir, route)?;
    let html = pipeline.render_page(route).await?;

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&path, html).await?;

    Ok(path)
}
