//! Render entry providers.
//!
//! The render entry is the pre-built server JavaScript bundle. How it is
//! obtained is the only difference between development and production
//! rendering:
//!
//! - [`LiveReloadProvider`] reads the entry from disk on every render, so a
//!   rebuilt bundle is picked up without restarting the process. A sibling
//!   `<entry>.map` is read alongside it so script errors point at the original
//!   sources.
//! - [`StaticProvider`] reads it once at startup and hands out the cached copy.
//!
//! One provider is chosen at startup and never switched.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sourcemap::SourceMap;

use crate::error::{Result, SsrError};

/// Source of a render entry, ready to execute.
#[derive(Clone, Debug)]
pub struct RenderEntry {
    /// Script name reported in stack traces.
    pub name: String,
    /// JavaScript source.
    pub code: Arc<str>,
    /// Source map for `code`, used to rewrite error stacks.
    pub source_map: Option<Arc<SourceMap>>,
}

/// Capability to obtain the render entry for a render call.
pub trait RenderEntryProvider: Send + Sync {
    /// Resolve the entry for one render.
    fn entry(&self) -> Result<RenderEntry>;

    /// True when the entry is re-resolved on every call.
    fn is_live(&self) -> bool;
}

fn ensure_js(path: &Path) -> Result<()> {
    if path.extension() != Some(OsStr::new("js")) && path.extension() != Some(OsStr::new("mjs"))
    {
        return Err(SsrError::EntryLoad {
            path: path.display().to_string(),
            reason: "Render entry must be a .js or .mjs file".to_string(),
        });
    }
    Ok(())
}

fn read_entry(path: &Path) -> Result<RenderEntry> {
    let canonical = path.canonicalize().map_err(|e| SsrError::EntryLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let code = std::fs::read_to_string(&canonical).map_err(|e| SsrError::EntryLoad {
        path: canonical.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(RenderEntry {
        name: canonical.display().to_string(),
        code: Arc::from(code),
        source_map: None,
    })
}

/// Read `<entry>.map` next to the entry. A missing map is normal; an
/// unreadable one is logged and ignored.
fn read_source_map(entry: &Path) -> Option<Arc<SourceMap>> {
    let mut path = entry.as_os_str().to_owned();
    path.push(".map");
    let path = PathBuf::from(path);

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(map = %path.display(), error = %e, "Failed to read source map");
            return None;
        }
    };

    match SourceMap::from_slice(&bytes) {
        Ok(map) => Some(Arc::new(map)),
        Err(e) => {
            tracing::warn!(map = %path.display(), error = %e, "Ignoring invalid source map");
            None
        }
    }
}

/// Development provider: re-reads the entry file on every render.
#[derive(Debug, Clone)]
pub struct LiveReloadProvider {
    path: PathBuf,
}

impl LiveReloadProvider {
    /// Create a provider for the entry at `path`.
    ///
    /// The file does not need to exist yet; it is read on each render.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_js(&path)?;

        if !path.exists() {
            tracing::warn!(
                entry = %path.display(),
                "Render entry not found yet, renders will fail until it is built"
            );
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderEntryProvider for LiveReloadProvider {
    fn entry(&self) -> Result<RenderEntry> {
        let mut entry = read_entry(&self.path)?;
        entry.source_map = read_source_map(Path::new(&entry.name));
        Ok(entry)
    }

    fn is_live(&self) -> bool {
        true
    }
}

/// Production provider: the entry is loaded once and cached.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    entry: RenderEntry,
}

impl StaticProvider {
    /// Load the entry from disk (I/O, once).
    pub fn load(path: &Path) -> Result<Self> {
        ensure_js(path)?;
        let entry = read_entry(path)?;

        tracing::info!(
            entry = %entry.name,
            bytes = entry.code.len(),
            "Render entry loaded"
        );

        Ok(Self { entry })
    }

    /// Wrap an entry that is already in memory.
    pub fn from_source(name: impl Into<String>, code: impl Into<Arc<str>>) -> Self {
        Self {
            entry: RenderEntry {
                name: name.into(),
                code: code.into(),
                source_map: None,
            },
        }
    }
}

impl RenderEntryProvider for StaticProvider {
    fn entry(&self) -> Result<RenderEntry> {
        Ok(self.entry.clone())
    }

    fn is_live(&self) -> bool {
        false
    }
}
