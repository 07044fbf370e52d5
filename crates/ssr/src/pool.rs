//! SSR worker pool for concurrent rendering.
//!
//! The pool manages multiple worker threads, distributing render requests
//! using round-robin scheduling with backpressure support.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde::Serialize;
use tokio::sync::oneshot;
use wayfarer_ssr_core::{RenderOutput, SsrConfig, SsrPoolConfig};

use crate::{
    error::{Result, SsrError},
    provider::RenderEntryProvider,
    worker::{RenderRequest, SsrWorker},
};

/// Health checks use a shorter timeout than regular renders.
const HEALTH_TIMEOUT_MS: u64 = 5_000;

/// A pool of SSR workers for concurrent rendering.
pub struct SsrPool {
    workers: Vec<SsrWorker>,
    next_worker: AtomicUsize,
    config: Arc<SsrPoolConfig>,
    live: bool,
}

impl SsrPool {
    /// Create a new SSR pool.
    ///
    /// Spawns `config.worker_count` worker threads sharing one provider.
    pub fn new(config: SsrPoolConfig, provider: Arc<dyn RenderEntryProvider>) -> Self {
        let config = Arc::new(config);
        let live = provider.is_live();

        let workers: Vec<_> = (0..config.worker_count)
            .map(|_| SsrWorker::spawn(Arc::clone(&provider), Arc::clone(&config)))
            .collect();

        tracing::info!(
            worker_count = workers.len(),
            live_reload = live,
            "SSR pool initialized"
        );

        Self {
            workers,
            next_worker: AtomicUsize::new(0),
            config,
            live,
        }
    }

    /// Create pool and warm up all workers.
    ///
    /// Sends a home-page render to each worker so the first real request does
    /// not pay for isolate start-up. Warm-up failures are logged, not fatal.
    pub async fn new_with_warmup(
        config: SsrPoolConfig,
        provider: Arc<dyn RenderEntryProvider>,
    ) -> Result<Self> {
        let pool = Self::new(config, provider);

        tracing::info!("Warming up {} SSR workers...", pool.workers.len());

        let warmup_config = probe_config()?;
        for i in 0..pool.workers.len() {
            match pool.render(warmup_config.clone()).await {
                Ok(_) => tracing::debug!(worker = i, "Worker warmed up"),
                Err(e) => tracing::warn!(worker = i, error = %e, "Worker warmup failed"),
            }
        }

        tracing::info!("SSR pool warm-up complete");
        Ok(pool)
    }

    /// True when the pool re-resolves its render entry on every call.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Render a route using the SSR pool.
    ///
    /// Uses round-robin scheduling to distribute requests across workers.
    /// Returns `Overloaded` error if no workers have capacity.
    pub async fn render(&self, config: SsrConfig) -> Result<RenderOutput> {
        // Check capacity before queueing (backpressure)
        let available = self.workers.iter().filter(|w| w.has_capacity()).count();
        if available == 0 {
            return Err(SsrError::Overloaded {
                retry_after_secs: 5,
            });
        }

        let config_json = config.to_json().map_err(SsrError::Core)?;
        let (_, result) = self
            .dispatch(config_json, self.config.render_timeout_ms)
            .await?;
        result
    }

    /// Send a request to the next worker and wait for the reply.
    ///
    /// The outer result reports transport failures, the inner one the render.
    async fn dispatch(
        &self,
        config_json: String,
        timeout_ms: u64,
    ) -> Result<(usize, Result<RenderOutput>)> {
        let (response_tx, response_rx) = oneshot::channel();

        // Round-robin worker selection
        let worker_idx = self.next_worker.fetch_add(1, Ordering::Relaxed) % self.workers.len();
        let worker = &self.workers[worker_idx];

        worker
            .sender()
            .send(RenderRequest {
                config_json,
                response_tx,
            })
            .await
            .map_err(|_| SsrError::ChannelClosed)?;

        let timeout = tokio::time::Duration::from_millis(timeout_ms);
        match tokio::time::timeout(timeout, response_rx).await {
            Ok(Ok(result)) => Ok((worker_idx, result)),
            Ok(Err(_)) => Err(SsrError::ChannelClosed),
            Err(_) => Err(SsrError::Timeout(timeout_ms)),
        }
    }

    /// Get pool statistics (passive - no I/O).
    pub fn stats(&self) -> SsrPoolStats {
        SsrPoolStats {
            worker_count: self.workers.len(),
            workers_with_capacity: self.workers.iter().filter(|w| w.has_capacity()).count(),
            live_reload: self.live,
        }
    }

    /// Active health check - verifies workers can process requests.
    ///
    /// Renders the home route and reports latency.
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let start = std::time::Instant::now();
        let config_json = probe_config()?.to_json().map_err(SsrError::Core)?;

        let (worker_idx, result) = self.dispatch(config_json, HEALTH_TIMEOUT_MS).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(HealthStatus {
            healthy: result.is_ok(),
            latency_ms,
            worker_idx,
            stats: self.stats(),
            error: result.err().map(|e| e.to_string()),
        })
    }
}

/// Minimal render input used for warm-up and health probes.
fn probe_config() -> Result<SsrConfig> {
    SsrConfig::new(
        "/",
        serde_json::json!({ "seo": null, "pageData": null, "route": "/" }),
    )
    .map_err(SsrError::Core)
}

/// Pool statistics (passive data).
#[derive(Debug, Clone, Serialize)]
pub struct SsrPoolStats {
    pub worker_count: usize,
    pub workers_with_capacity: usize,
    pub live_reload: bool,
}

/// Health check result.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency_ms: u64,
    pub worker_idx: usize,
    pub stats: SsrPoolStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{LiveReloadProvider, StaticProvider};

    const ECHO_ENTRY: &str = r#"
        const cfg = globalThis.__SSR_CONFIG__;
        Deno.core.ops.op_set_head(JSON.stringify({ title: "Page " + cfg.route }));
        Deno.core.ops.op_set_html("<main>" + cfg.route + "</main>");
    "#;

    fn pool_with(code: &str) -> SsrPool {
        let provider = Arc::new(StaticProvider::from_source("entry-server.js", code));
        SsrPool::new(SsrPoolConfig::with_defaults(1).unwrap(), provider)
    }

    #[tokio::test]
    async fn test_render_returns_html_and_head() {
        let pool = pool_with(ECHO_ENTRY);
        let config = SsrConfig::new("/about", serde_json::json!({})).unwrap();

        let output = pool.render(config).await.unwrap();

        assert_eq!(output.html, "<main>/about</main>");
        assert_eq!(output.head.title.as_deref(), Some("Page /about"));
    }

    #[tokio::test]
    async fn test_render_without_html_fails() {
        let pool = pool_with("// renders nothing");
        let config = SsrConfig::new("/", serde_json::json!({})).unwrap();

        let result = pool.render(config).await;
        assert!(matches!(result, Err(SsrError::NoHtmlRendered)));
    }

    #[tokio::test]
    async fn test_render_exception_propagates() {
        let pool = pool_with(r#"throw new Error("boom");"#);
        let config = SsrConfig::new("/", serde_json::json!({})).unwrap();

        match pool.render(config).await {
            Err(SsrError::JsExecution(message)) => assert!(message.contains("boom")),
            other => panic!("expected JsExecution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exception_stack_names_entry_file() {
        let provider = Arc::new(StaticProvider::from_source(
            "/srv/site/dist/server/entry-server.js",
            "throw new Error('boom');",
        ));
        let pool = SsrPool::new(SsrPoolConfig::with_defaults(1).unwrap(), provider);
        let config = SsrConfig::new("/", serde_json::json!({})).unwrap();

        match pool.render(config).await {
            Err(SsrError::JsExecution(message)) => {
                assert!(message.contains("boom"));
                assert!(message.contains("/srv/site/dist/server/entry-server.js:1"));
            }
            other => panic!("expected JsExecution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_live_exception_stack_is_source_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let entry = dir.path().join("entry-server.js");
        std::fs::write(&entry, "// bundle\nthrow new Error('boom');\n").unwrap();
        // Bundle line 2 comes from line 10, column 3 of the original source
        std::fs::write(
            dir.path().join("entry-server.js.map"),
            r#"{"version":3,"sources":["../../src/entry-server.tsx"],"names":[],"mappings":";AASE"}"#,
        )
        .unwrap();

        let provider = Arc::new(LiveReloadProvider::new(&entry).unwrap());
        let pool = SsrPool::new(SsrPoolConfig::with_defaults(1).unwrap(), provider);
        let config = SsrConfig::new("/", serde_json::json!({})).unwrap();

        match pool.render(config).await {
            Err(SsrError::JsExecution(message)) => {
                assert!(message.contains("boom"));
                assert!(message.contains("../../src/entry-server.tsx:10:3"));
                assert!(!message.contains("entry-server.js:2"));
            }
            other => panic!("expected JsExecution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let pool = pool_with(ECHO_ENTRY);
        let status = pool.health_check().await.unwrap();

        assert!(status.healthy);
        assert!(status.error.is_none());
        assert_eq!(status.stats.worker_count, 1);
        assert!(!status.stats.live_reload);
    }
}
