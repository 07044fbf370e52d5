//! Startup wiring shared by the server and the pre-renderer.

use std::sync::Arc;

use anyhow::Context;
use wayfarer_client::SupabaseClient;
use wayfarer_core::storage::ContentRepository;
use wayfarer_ssr::{LiveReloadProvider, RenderEntryProvider, SsrPool, StaticProvider};

use crate::config::{Config, Mode};
use crate::pipeline::RenderPipeline;
use crate::resolver::Resolver;
use crate::storage::InMemoryRepository;
use crate::template::TemplateStore;

/// Everything a process needs to render pages.
pub struct Site {
    pub pipeline: Arc<RenderPipeline>,
    pub pool: Arc<SsrPool>,
    pub repo: Arc<dyn ContentRepository>,
}

impl Site {
    /// Build the site for `config`, reading the template through `templates`.
    pub async fn init(config: &Config, templates: TemplateStore) -> anyhow::Result<Self> {
        let repo = content_repository(config)?;
        let provider = entry_provider(config)?;

        let pool_config = config
            .pool_config()
            .context("Invalid SSR pool configuration")?;

        tracing::info!(
            mode = ?config.mode,
            workers = pool_config.worker_count,
            entry = %config.server_entry_path().display(),
            "Initializing SSR pool"
        );

        let pool = Arc::new(SsrPool::new_with_warmup(pool_config, provider).await?);
        let pipeline = Arc::new(RenderPipeline::new(
            templates,
            Resolver::new(Arc::clone(&repo)),
            Arc::clone(&pool) as _,
        ));

        Ok(Self {
            pipeline,
            pool,
            repo,
        })
    }
}

/// Content source: a local fixture when configured, the hosted database
/// otherwise. A missing database URL or key is not fatal here; lookups fail
/// per request and degrade to empty fields.
pub fn content_repository(config: &Config) -> anyhow::Result<Arc<dyn ContentRepository>> {
    if let Some(path) = &config.content_fixture {
        let repo = InMemoryRepository::load(path)
            .with_context(|| format!("Failed to load content fixture {}", path.display()))?;
        return Ok(Arc::new(repo));
    }

    Ok(Arc::new(SupabaseClient::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    )))
}

/// Render entry source for the configured mode.
pub fn entry_provider(config: &Config) -> anyhow::Result<Arc<dyn RenderEntryProvider>> {
    let path = config.server_entry_path();

    let provider: Arc<dyn RenderEntryProvider> = match config.mode {
        Mode::Development => Arc::new(LiveReloadProvider::new(&path)?),
        Mode::Production => Arc::new(
            StaticProvider::load(&path)
                .with_context(|| format!("Failed to load render entry {}", path.display()))?,
        ),
    };

    Ok(provider)
}
