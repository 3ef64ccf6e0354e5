//! `reqwest`-backed object store and image fetcher.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};
use url::Url;

use crate::errors::StorageError;
use crate::interfaces::{FetchedImage, ImageFetcher, ObjectStore};

/// Object store reached over plain HTTP `PUT` requests
/// (`{endpoint}/{bucket}/{key}`), as exposed by S3-compatible gateways.
pub struct HttpObjectStore {
    http: reqwest::Client,
    endpoint: Url,
    bucket: String,
    public_base_url: Option<String>,
}

impl HttpObjectStore {
    /// Create a store writing to `bucket` at `endpoint`.
    pub fn new(endpoint: &str, bucket: impl Into<String>) -> Result<Self, StorageError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| StorageError::InvalidUrl(e.to_string()))?;
        let bucket = bucket.into();

        info!(endpoint = %endpoint, bucket = %bucket, "Created object store client");

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            bucket,
            public_base_url: None,
        })
    }

    /// Serve stored objects to the public under `public_base_url` instead of
    /// the storage endpoint.
    pub fn with_public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(public_base_url.into());
        self
    }

    fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/{}/{}", base, self.bucket, key))
            .map_err(|e| StorageError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let url = self.object_url(key)?;
        let size = body.len();

        let mut request = self.http.put(url).body(body);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::put(key, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::put(
                key,
                format!("status {}: {}", status, body),
            ));
        }

        debug!(key = %key, bytes = size, "Stored object");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base, key),
            None => format!(
                "{}/{}/{}",
                self.endpoint.as_str().trim_end_matches('/'),
                self.bucket,
                key
            ),
        }
    }
}

/// Downloads images with a shared `reqwest` client.
pub struct HttpImageFetcher {
    http: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, StorageError> {
        let parsed = Url::parse(url).map_err(|e| StorageError::InvalidUrl(e.to_string()))?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|e| StorageError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::fetch(url, format!("status {}", status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::fetch(url, e.to_string()))?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        let store = HttpObjectStore::new("https://storage.example.org/", "groups-site").unwrap();

        let url = store.object_url("group-images/group-12").unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.example.org/groups-site/group-images/group-12"
        );
    }

    #[test]
    fn test_public_url() {
        let store = HttpObjectStore::new("https://storage.example.org", "groups-site")
            .unwrap()
            .with_public_base_url("https://groups.example.org");

        assert_eq!(
            store.public_url("group-images/group-12"),
            "https://groups.example.org/group-images/group-12"
        );
    }

    #[test]
    fn test_public_url_defaults_to_storage_endpoint() {
        let store = HttpObjectStore::new("https://storage.example.org/", "groups-site").unwrap();

        assert_eq!(
            store.public_url("group-images/group-12"),
            "https://storage.example.org/groups-site/group-images/group-12"
        );
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let fetcher = HttpImageFetcher::new();

        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(StorageError::InvalidUrl(_))));
    }
}
