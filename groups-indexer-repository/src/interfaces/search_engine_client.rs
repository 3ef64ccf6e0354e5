//! Search sink trait definition.
//!
//! The sync jobs write group documents through this trait and the search
//! handler reads them back; OpenSearch is the production backend.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use groups_indexer_shared::{GroupQuery, GroupSearchDocument};

/// A single ranked hit returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Id of the document in the index.
    pub id: String,
    /// The stored document, undecoded.
    pub source: Value,
}

/// Operations the groups indexer needs from a search engine.
///
/// Implementations must be `Send + Sync` so one client can be shared by the
/// sink and the search handler.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Execute a search query against the groups index.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text clause, exact-match filters and result size
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SearchHit>)` - At most `query.size` hits, ordered by relevance
    /// * `Err(SearchError)` - If the search fails
    async fn search(&self, query: &GroupQuery) -> Result<Vec<SearchHit>, SearchError>;

    /// Index multiple documents in a single bulk operation.
    ///
    /// Each document is upserted under `document.id` as a string, so a rerun
    /// overwrites rather than duplicates.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If all documents were indexed successfully
    /// * `Err(SearchError::BulkIndexError)` - If any document failed, with the
    ///   aggregated failure reasons
    async fn bulk_index(&self, documents: &[GroupSearchDocument]) -> Result<(), SearchError>;

    /// Ensure the search index exists with proper mappings.
    ///
    /// If the index doesn't exist, it will be created with the appropriate
    /// settings and mappings for group search.
    async fn ensure_index_exists(&self) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
