//! # Groups Indexer
//!
//! Main library for the groups indexer.
//!
//! This crate provides the configuration, dependency wiring and inbound
//! surfaces: the two sync jobs, the group search handler and the
//! search-fields handler.

pub mod config;
pub mod search;

pub use config::{Dependencies, Settings};
pub use search::{ApiError, ApiResponse, GroupsSearchHandler, SearchFieldsHandler};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] groups_indexer_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] groups_indexer_repository::SearchError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
