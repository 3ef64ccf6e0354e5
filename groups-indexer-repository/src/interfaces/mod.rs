//! Interface definitions for the indexer's collaborators.
//!
//! The search engine, the membership API and object storage are all reached
//! through traits so they can be swapped for mocks in tests.

mod group_source;
mod object_store;
mod search_engine_client;

pub use group_source::{GroupProfilesRequest, GroupSource};
pub use object_store::{FetchedImage, ImageFetcher, ObjectStore};
pub use search_engine_client::{SearchEngineClient, SearchHit};
