//! Error types for grid rendering.
//!
//! Bad input is never an error here: out-of-range or malformed values are
//! clamped or replaced by defaults, and an empty result set renders as a
//! marker. What remains are failures of collaborators (the content
//! repository, template compilation, reading configuration files).

use std::path::PathBuf;

use thiserror::Error;

/// Error reported by a [`ContentRepository`](crate::ContentRepository).
///
/// Repositories own their failure modes; the renderer propagates them
/// unchanged and never retries.
pub type RepositoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while rendering grids or loading their inputs.
#[derive(Debug, Error)]
pub enum GridError {
    /// The content repository failed to execute a query.
    #[error("content repository failed: {0}")]
    Repository(#[source] RepositoryError),

    /// A markup template failed to compile or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A settings or content file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file had an extension we do not know how to parse.
    #[error("unsupported file format for {}: expected .yaml, .yml or .json", .0.display())]
    UnsupportedFormat(PathBuf),

    /// YAML parse failure.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse failure.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
