//! HTML shell the pages are composed into.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::Mode;

/// Browser side of the dev reload channel: reloads the page on `reload`
/// events and after the server comes back from a restart.
pub const DEV_CLIENT_SCRIPT: &str = r#"<script>
(function() {
    var es = new EventSource('/_dev/events');
    var retryCount = 0;
    var maxRetries = 10;

    es.addEventListener('reload', function() {
        console.log('[Dev] Reload signal received, refreshing...');
        location.reload();
    });

    es.addEventListener('connected', function() {
        retryCount = 0;
    });

    es.onerror = function() {
        retryCount++;
        if (retryCount <= maxRetries) {
            setTimeout(function() { location.reload(); }, 2000);
        } else {
            es.close();
        }
    };
})();
</script>"#;

const BODY_CLOSE: &str = "</body>";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the template comes from.
#[derive(Debug, Clone)]
pub enum TemplateStore {
    /// Loaded once; every request shares it.
    Static(Arc<str>),
    /// Read from disk on every request, with the dev client injected.
    Live { path: PathBuf },
}

impl TemplateStore {
    /// Template store for a rendering mode.
    ///
    /// Production reads the file now, so a missing template fails startup.
    pub async fn for_mode(mode: Mode, path: &Path) -> Result<Self, TemplateError> {
        match mode {
            Mode::Development => {
                if !path.exists() {
                    tracing::warn!(template = %path.display(), "Template not found yet");
                }
                Ok(Self::Live {
                    path: path.to_path_buf(),
                })
            }
            Mode::Production => Self::load(path).await,
        }
    }

    /// Read the template once.
    pub async fn load(path: &Path) -> Result<Self, TemplateError> {
        let template = read(path).await?;
        tracing::info!(template = %path.display(), bytes = template.len(), "Template loaded");
        Ok(Self::Static(Arc::from(template)))
    }

    /// Template already in memory.
    pub fn fixed(template: impl Into<Arc<str>>) -> Self {
        Self::Static(template.into())
    }

    /// Template for one render.
    pub async fn get(&self) -> Result<Arc<str>, TemplateError> {
        match self {
            Self::Static(template) => Ok(Arc::clone(template)),
            Self::Live { path } => {
                let template = read(path).await?;
                Ok(Arc::from(inject_dev_client(&template)))
            }
        }
    }

    /// Path watched for changes, if the template is read live.
    pub fn watched_path(&self) -> Option<&Path> {
        match self {
            Self::Static(_) => None,
            Self::Live { path } => Some(path),
        }
    }
}

async fn read(path: &Path) -> Result<String, TemplateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })
}

/// Insert the dev client before `</body>`, or append it when there is none.
pub fn inject_dev_client(template: &str) -> String {
    match template.rfind(BODY_CLOSE) {
        Some(at) => {
            let mut out = String::with_capacity(template.len() + DEV_CLIENT_SCRIPT.len() + 1);
            out.push_str(&template[..at]);
            out.push_str(DEV_CLIENT_SCRIPT);
            out.push('\n');
            out.push_str(&template[at..]);
            out
        }
        None => format!("{template}\n{DEV_CLIENT_SCRIPT}"),
    }
}
