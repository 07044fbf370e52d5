//! Shared application state.
//!
//! Cloned into every request handler. Holds the render pipeline, the mode the
//! server was started in and the broadcast channels behind the dev reload
//! events.

use std::sync::Arc;

use tokio::sync::broadcast;
use wayfarer_ssr::SsrPool;

use crate::config::Mode;
use crate::pipeline::RenderPipeline;

#[derive(Clone)]
pub struct AppState {
    /// Resolve, render, compose.
    pub pipeline: Arc<RenderPipeline>,
    /// Mode chosen at startup.
    pub mode: Mode,
    /// SSR worker pool, for health reporting.
    /// None when pages are rendered by something else (e.g., in tests).
    pub ssr_pool: Option<Arc<SsrPool>>,
    /// Shutdown signal sender for SSE connections.
    pub shutdown_tx: broadcast::Sender<()>,
    /// Dev mode reload signal sender (for browser auto-refresh).
    pub dev_reload_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(pipeline: Arc<RenderPipeline>, mode: Mode) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let (dev_reload_tx, _) = broadcast::channel(1);

        Self {
            pipeline,
            mode,
            ssr_pool: None,
            shutdown_tx,
            dev_reload_tx,
        }
    }

    /// Set the SSR pool reported by the health endpoints.
    pub fn with_ssr_pool(mut self, pool: Arc<SsrPool>) -> Self {
        self.ssr_pool = Some(pool);
        self
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all SSE connections to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Subscribe to dev reload signal (for browser auto-refresh).
    pub fn subscribe_dev_reload(&self) -> broadcast::Receiver<()> {
        self.dev_reload_tx.subscribe()
    }

    /// Signal all connected browsers to reload (dev mode only).
    pub fn signal_dev_reload(&self) {
        let _ = self.dev_reload_tx.send(());
        tracing::debug!("Dev reload signal sent");
    }
}
