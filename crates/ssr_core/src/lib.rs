//! Pure SSR logic - no I/O, no async, no side effects.
//!
//! This crate provides:
//! - Render configuration types with validation
//! - Polyfill generation for running a server render entry inside `deno_core`
//! - The head-data model a render returns alongside its HTML
//! - JSON escaping for embedding data inside `<script>` elements
//!
//! # Example
//!
//! ```
//! use wayfarer_ssr_core::{generate_polyfills, HeadData, SsrConfig, SsrPoolConfig};
//!
//! // Create validated config
//! let config = SsrConfig::new("/about", serde_json::json!({ "route": "/about" })).unwrap();
//!
//! // Serialize to JSON
//! let json = config.to_json().unwrap();
//!
//! // Generate polyfills (pure string transformation)
//! let polyfills = generate_polyfills(&json, "production").unwrap();
//! assert!(polyfills.contains("__SSR_CONFIG__"));
//!
//! // Head data reported by the render entry
//! let head = HeadData::from_json(r#"{"title":"About us"}"#).unwrap();
//! assert_eq!(head.to_html(), "<title>About us</title>");
//!
//! // Create pool config with validation
//! let pool_config = SsrPoolConfig::with_defaults(4).unwrap();
//! assert_eq!(pool_config.worker_count, 4);
//! ```

mod config;
mod error;
mod escape;
mod head;
mod polyfills;

pub use config::{SsrConfig, SsrPoolConfig};
pub use error::{Result, SsrCoreError, MAX_INITIAL_DATA_SIZE};
pub use escape::{escape_html, escape_inline_script, script_safe_json};
pub use head::{HeadData, HeadTag, RenderOutput};
pub use polyfills::generate_polyfills;
