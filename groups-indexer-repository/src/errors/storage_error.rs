//! Object storage and image download error types.

use thiserror::Error;

/// Errors from fetching remote images or writing to object storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Downloading a remote object failed.
    #[error("Fetch error for {url}: {message}")]
    FetchError { url: String, message: String },

    /// Writing an object failed.
    #[error("Put error for {key}: {message}")]
    PutError { key: String, message: String },

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl StorageError {
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchError {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn put(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PutError {
            key: key.into(),
            message: message.into(),
        }
    }
}
