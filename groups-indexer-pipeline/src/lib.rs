//! # Groups Indexer Pipeline
//!
//! This crate provides the pipeline components that pull groups from the
//! membership API and write them to a sink: either the search index or a
//! single snapshot object in storage.
//!
//! ## Architecture
//!
//! The pipeline follows the Source-Processor-Loader pattern:
//!
//! 1. **Source**: Fetches every group profile in one call
//! 2. **Processor**: Filters out private groups and transforms the rest into search documents
//! 3. **Assets**: Re-hosts each group's image in durable storage
//! 4. **Loader**: Writes the documents to the configured sink
//! 5. **Orchestrator**: Coordinates one full synchronization pass
//!
//! The **Facets** cache serves the dropdown filter definitions and is shared
//! with the query side.

pub mod assets;
pub mod errors;
pub mod facets;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use assets::{AssetMigrator, ImageOutcome, ImageReference};
pub use errors::{MigrationError, PipelineError};
pub use facets::{FacetCache, FacetIds, DEFAULT_REFRESH_INTERVAL};
pub use loader::{GroupSink, IndexSink, SnapshotSink};
pub use orchestrator::{ItemOutcome, RunSummary, SyncOrchestrator, COMPLETION_TOKEN};
pub use processor::{GroupProcessor, ProcessedGroup, SkipReason};
