//! Output layout of pre-rendered pages.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutputPathError {
    #[error("Route must start with '/': {0}")]
    Relative(String),
    #[error("Route contains an unsafe segment: {0}")]
    UnsafeSegment(String),
}

/// File a route is written to: `<root>/<route>/index.html`.
///
/// The home route maps to `<root>/index.html`. Routes with empty, `.` or `..`
/// segments or backslashes are rejected so output never escapes `root`.
pub fn output_path(root: &Path, route: &str) -> Result<PathBuf, OutputPathError> {
    let Some(rest) = route.strip_prefix('/') else {
        return Err(OutputPathError::Relative(route.to_string()));
    };

    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let mut path = root.to_path_buf();

    if !rest.is_empty() {
        for segment in rest.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(OutputPathError::UnsafeSegment(route.to_string()));
            }
            path.push(segment);
        }
    }

    path.push("index.html");
    Ok(path)
}
