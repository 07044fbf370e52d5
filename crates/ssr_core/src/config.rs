//! Configuration types for SSR with validation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SsrCoreError, MAX_INITIAL_DATA_SIZE};

/// Configuration for a single SSR render request.
///
/// Exposed to the render entry as `globalThis.__SSR_CONFIG__`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsrConfig {
    /// Route being rendered (path only).
    pub route: String,
    /// Page payload the render entry hydrates from.
    pub initial_data: serde_json::Value,
}

impl SsrConfig {
    /// Create a new SSR config for a route.
    ///
    /// Validates the route shape and that the payload size is within limits.
    pub fn new(route: impl Into<String>, initial_data: serde_json::Value) -> Result<Self> {
        let route = route.into();
        if !route.starts_with('/') {
            return Err(SsrCoreError::InvalidConfig(format!(
                "route must start with '/': {route}"
            )));
        }

        let size = serde_json::to_string(&initial_data)
            .map(|s| s.len())
            .unwrap_or(0);

        if size > MAX_INITIAL_DATA_SIZE {
            return Err(SsrCoreError::PayloadTooLarge {
                size,
                max: MAX_INITIAL_DATA_SIZE,
            });
        }

        Ok(Self {
            route,
            initial_data,
        })
    }

    /// Serialize config to JSON string (pure transformation).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SsrCoreError::Serialization(e.to_string()))
    }
}

/// Configuration for the SSR worker pool (validated).
#[derive(Clone, Debug)]
pub struct SsrPoolConfig {
    /// Number of worker threads.
    pub worker_count: usize,
    /// Maximum pending requests per worker before rejecting.
    pub max_pending: usize,
    /// Render timeout in milliseconds.
    pub render_timeout_ms: u64,
    /// NODE_ENV value seen by the render entry.
    pub node_env: String,
}

impl SsrPoolConfig {
    /// Create and validate pool config.
    pub fn new(
        worker_count: usize,
        max_pending: usize,
        render_timeout_ms: u64,
        node_env: String,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(SsrCoreError::InvalidWorkerCount);
        }
        if render_timeout_ms == 0 {
            return Err(SsrCoreError::InvalidTimeout);
        }
        if max_pending == 0 {
            return Err(SsrCoreError::InvalidConfig(
                "max_pending must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            worker_count,
            max_pending,
            render_timeout_ms,
            node_env,
        })
    }

    /// Create with defaults (100 pending, 10s timeout, production).
    pub fn with_defaults(worker_count: usize) -> Result<Self> {
        Self::new(worker_count, 100, 10_000, "production".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssr_config_new_valid() {
        let data = serde_json::json!({"route": "/"});
        let config = SsrConfig::new("/", data).unwrap();
        assert_eq!(config.route, "/");
        assert_eq!(config.initial_data["route"], "/");
    }

    #[test]
    fn test_ssr_config_rejects_relative_route() {
        let result = SsrConfig::new("about", serde_json::json!({}));
        assert!(matches!(result, Err(SsrCoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_ssr_config_payload_too_large() {
        let large_string = "x".repeat(6 * 1024 * 1024);
        let data = serde_json::json!({"large": large_string});
        let result = SsrConfig::new("/", data);
        assert!(matches!(result, Err(SsrCoreError::PayloadTooLarge { .. })));
    }

    #[test]
    fn test_ssr_config_to_json_uses_camel_case() {
        let config = SsrConfig::new("/blog/hello", serde_json::json!({"k": "v"})).unwrap();
        let json = config.to_json().unwrap();
        assert!(json.contains(r#""route":"/blog/hello""#));
        assert!(json.contains(r#""initialData":{"k":"v"}"#));
    }

    #[test]
    fn test_pool_config_valid() {
        let config = SsrPoolConfig::new(4, 100, 10_000, "production".to_string()).unwrap();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.max_pending, 100);
        assert_eq!(config.render_timeout_ms, 10_000);
        assert_eq!(config.node_env, "production");
    }

    #[test]
    fn test_pool_config_zero_workers() {
        let result = SsrPoolConfig::new(0, 100, 10_000, "production".to_string());
        assert!(matches!(result, Err(SsrCoreError::InvalidWorkerCount)));
    }

    #[test]
    fn test_pool_config_zero_timeout() {
        let result = SsrPoolConfig::new(4, 100, 0, "production".to_string());
        assert!(matches!(result, Err(SsrCoreError::InvalidTimeout)));
    }

    #[test]
    fn test_pool_config_zero_pending() {
        let result = SsrPoolConfig::new(4, 0, 10_000, "production".to_string());
        assert!(matches!(result, Err(SsrCoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_pool_config_with_defaults() {
        let config = SsrPoolConfig::with_defaults(8).unwrap();
        assert_eq!(config.worker_count, 8);
        assert_eq!(config.max_pending, 100);
        assert_eq!(config.render_timeout_ms, 10_000);
        assert_eq!(config.node_env, "production");
    }
}
