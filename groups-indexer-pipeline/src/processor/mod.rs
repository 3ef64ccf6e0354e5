//! Processor module for the groups indexer pipeline.
//!
//! Filters groups and transforms them into search documents.

mod group_processor;
pub mod transform;

pub use group_processor::{GroupProcessor, ProcessedGroup, SkipReason};
pub use transform::{abbreviate_name, transform};
