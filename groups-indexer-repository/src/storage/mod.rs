//! HTTP implementations of object storage and image download.

mod http;

pub use http::{HttpImageFetcher, HttpObjectStore};
