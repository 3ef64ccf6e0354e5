//! # Groups Indexer Repository
//!
//! This crate provides traits and implementations for the collaborators the
//! groups indexer talks to: the search engine, the membership (source) API,
//! and object storage. It includes definitions for errors, interfaces, and
//! concrete implementations for OpenSearch and HTTP backends.

pub mod ccb;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod storage;

pub use ccb::CcbClient;
pub use errors::{SearchError, SourceError, StorageError};
pub use interfaces::{
    FetchedImage, GroupProfilesRequest, GroupSource, ImageFetcher, ObjectStore,
    SearchEngineClient, SearchHit,
};
pub use opensearch::OpenSearchClient;
pub use storage::{HttpImageFetcher, HttpObjectStore};
