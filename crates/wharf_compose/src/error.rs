//! Error types for rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering the output tree. Every variant
/// carries the destination path that failed.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to render {path:?}: unknown template variable '{variable}'")]
    UnknownVariable { path: PathBuf, variable: String },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stage output for {path:?}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
