//! SSR Worker Pool - Imperative Shell.
//!
//! This crate orchestrates I/O operations using pure functions from
//! `wayfarer_ssr_core`. It executes the server render entry with `deno_core`
//! on a pool of worker threads.
//!
//! # Architecture
//!
//! - **Functional Core** (`wayfarer_ssr_core`): validation, config, polyfills, head data
//! - **Imperative Shell** (this crate): entry loading, threading, JsRuntime execution
//!
//! # Example
//!
//! ```ignore
//! use std::{path::Path, sync::Arc};
//! use wayfarer_ssr::{SsrConfig, SsrPool, SsrPoolConfig, StaticProvider};
//!
//! // Production: load the pre-built entry once
//! let provider = Arc::new(StaticProvider::load(Path::new("dist/server/entry-server.js"))?);
//! let pool = SsrPool::new(SsrPoolConfig::with_defaults(4)?, provider);
//!
//! let config = SsrConfig::new("/about", serde_json::json!({ "route": "/about" }))?;
//! let output = pool.render(config).await?;
//! println!("{} / {}", output.html, output.head.to_html());
//! ```

mod error;
mod pool;
mod provider;
mod runtime;
mod stack;
mod worker;

// Re-export core types for convenience
pub use wayfarer_ssr_core::{
    escape_html, HeadData, HeadTag, RenderOutput, SsrConfig, SsrCoreError, SsrPoolConfig,
    MAX_INITIAL_DATA_SIZE,
};

// Export shell types
pub use error::{sanitize_error, Result, SsrError};
pub use pool::{HealthStatus, SsrPool, SsrPoolStats};
pub use provider::{LiveReloadProvider, RenderEntry, RenderEntryProvider, StaticProvider};
