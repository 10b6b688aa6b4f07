//! Error types for the version catalog.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading the version catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid bundled version record {name}: {source}")]
    InvalidRecord {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("bundled version record {name} has an empty version key")]
    EmptyVersion { name: String },
}
