//! HTTP client for the hosted content database.

mod content;

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

pub const SEO_TABLE: &str = "seo_metadata";
pub const PACKAGES_TABLE: &str = "packages";
pub const BLOG_POSTS_TABLE: &str = "blog_posts";

/// PostgREST client authenticated with the project's public API key.
///
/// Constructed even when the endpoint or key is missing: every query then
/// fails with [`ClientError::NotConfigured`], which callers degrade on.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl SupabaseClient {
    /// Create a new client for a project URL (e.g. `https://abc.supabase.co`).
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        if base_url.is_none() {
            tracing::warn!("Content database URL not set, content lookups will fail");
        }

        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Build the REST URL for a table.
    fn table_url(&self, table: &str) -> Result<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::NotConfigured("database URL is not set".to_string()))?;
        Ok(format!("{base}/rest/v1/{table}"))
    }

    /// Run a filtered select against a table.
    ///
    /// `query` holds PostgREST parameters such as `("slug", "eq.bali")`.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut request = self.client.get(self.table_url(table)?).query(query);

        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle error responses.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body).map_err(ClientError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
