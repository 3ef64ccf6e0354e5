//! Object storage and remote image traits.

use async_trait::async_trait;

use crate::errors::StorageError;

/// Durable key/value object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key`, replacing any existing object.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Publicly accessible URL of the object stored under `key`.
    fn public_url(&self, key: &str) -> String;
}

/// Binary content downloaded from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Downloads remote images.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, StorageError>;
}
