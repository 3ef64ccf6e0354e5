//! Errors raised by the search sink.

use thiserror::Error;

/// Failures talking to the search engine that holds the groups index.
///
/// All of these are fatal to a sync run. On the query side they become a
/// server error carrying the message.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The engine is unreachable or the client could not be built.
    #[error("Search engine unreachable: {0}")]
    ConnectionError(String),

    /// The engine rejected or failed a search request.
    #[error("Search failed: {0}")]
    QueryError(String),

    /// One or more documents in a bulk write were rejected.
    #[error("Bulk write failed: {0}")]
    BulkIndexError(String),

    /// The groups index could not be created.
    #[error("Could not create index: {0}")]
    IndexCreationError(String),

    /// The engine answered with a body we could not read.
    #[error("Malformed search engine response: {0}")]
    ParseError(String),

    /// A document could not be encoded for the engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
