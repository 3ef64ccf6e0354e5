//! Error types for the groups indexer pipeline.
//!
//! Failures come in two tiers. A `MigrationError` belongs to a single group
//! and is recorded in that group's outcome without stopping the run. A
//! `PipelineError` is fatal to the whole run.

use groups_indexer_repository::{SearchError, SourceError, StorageError};
use thiserror::Error;

/// Run-level errors. Any of these aborts the synchronization pass.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The membership API could not be read.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// The search engine rejected the write.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Object storage rejected the snapshot.
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    /// Facet definitions could not be loaded and no cached copy exists.
    #[error("Search fields unavailable: {0}")]
    FacetsUnavailable(String),

    /// A document or snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PipelineError {
    /// Create a facets unavailable error.
    pub fn facets_unavailable(msg: impl Into<String>) -> Self {
        Self::FacetsUnavailable(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Item-level failure to re-host a group's image.
///
/// Tolerated: the group is still indexed, without an image.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The image could not be downloaded.
    #[error("Failed to fetch image: {0}")]
    Fetch(#[source] StorageError),

    /// The image could not be written to storage.
    #[error("Failed to store image: {0}")]
    Store(#[source] StorageError),
}
