//! View loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// A lazy view failed to materialize.
///
/// Recoverable: the cache entry stays empty and a later navigation may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The view's chunk could not be read.
    #[error("failed to read chunk for '{component}' at {}: {message}", .path.display())]
    Io {
        component: String,
        path: PathBuf,
        message: String,
    },

    /// The load did not settle within the configured limit.
    #[error("loading '{component}' timed out after {timeout_ms} ms")]
    Timeout { component: String, timeout_ms: u64 },

    /// The load task panicked or was cancelled by the runtime.
    #[error("load task for '{component}' was aborted")]
    Aborted { component: String },

    /// Loader-specific failure.
    #[error("failed to load '{component}': {message}")]
    Failed { component: String, message: String },
}

impl LoadError {
    /// Component whose load failed.
    pub fn component(&self) -> &str {
        match self {
            LoadError::Io { component, .. }
            | LoadError::Timeout { component, .. }
            | LoadError::Aborted { component }
            | LoadError::Failed { component, .. } => component,
        }
    }
}
