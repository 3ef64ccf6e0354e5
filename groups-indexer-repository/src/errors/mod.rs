//! Error types for the groups indexer repository.

mod search_error;
mod source_error;
mod storage_error;

pub use search_error::SearchError;
pub use source_error::SourceError;
pub use storage_error::StorageError;
