//! SSR worker thread management.
//!
//! Each worker runs in a dedicated thread with its own Tokio runtime
//! because `deno_core::JsRuntime` is not `Send`.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use wayfarer_ssr_core::{RenderOutput, SsrPoolConfig};

use crate::{error::SsrError, provider::RenderEntryProvider, runtime};

/// Request sent to a worker for rendering.
pub struct RenderRequest {
    /// Serialized SSR config JSON.
    pub config_json: String,
    /// Channel to send the result back.
    pub response_tx: oneshot::Sender<Result<RenderOutput, SsrError>>,
}

/// A dedicated SSR worker thread.
pub struct SsrWorker {
    request_tx: mpsc::Sender<RenderRequest>,
}

impl SsrWorker {
    /// Spawn a new worker thread.
    ///
    /// The render entry is resolved through the provider for every request,
    /// which is what lets a live provider pick up a rebuilt bundle.
    pub fn spawn(provider: Arc<dyn RenderEntryProvider>, config: Arc<SsrPoolConfig>) -> Self {
        let (request_tx, mut request_rx) = mpsc::channel::<RenderRequest>(config.max_pending);

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    // Dropping the receiver makes senders observe ChannelClosed
                    tracing::error!(error = %e, "Failed to create Tokio runtime for SSR worker");
                    return;
                }
            };

            rt.block_on(async move {
                tracing::debug!("SSR worker started");

                while let Some(req) = request_rx.recv().await {
                    let result = match provider.entry() {
                        Ok(entry) => {
                            runtime::render(&entry, &req.config_json, &config.node_env).await
                        }
                        Err(e) => Err(e),
                    };

                    // Send result back, ignoring if receiver dropped
                    let _ = req.response_tx.send(result);
                }

                tracing::debug!("SSR worker shutting down");
            });
        });

        Self { request_tx }
    }

    /// Check if the worker has capacity for more requests.
    pub fn has_capacity(&self) -> bool {
        self.request_tx.capacity() > 0
    }

    /// Get a clone of the sender for sending requests.
    pub fn sender(&self) -> mpsc::Sender<RenderRequest> {
        self.request_tx.clone()
    }
}
