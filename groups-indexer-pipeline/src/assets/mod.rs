//! Asset migration for the groups indexer pipeline.
//!
//! Copies each group's image from the membership API into durable storage so
//! the public site never links to the source system.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::errors::MigrationError;
use groups_indexer_repository::{ImageFetcher, ObjectStore};

/// Storage key prefix for group images.
pub const IMAGE_KEY_PREFIX: &str = "group-images";

/// Deterministic storage key for a group's image.
///
/// Stable across runs so a re-migration overwrites instead of duplicating.
pub fn image_key(group_id: i64) -> String {
    format!("{}/group-{}", IMAGE_KEY_PREFIX, group_id)
}

/// How a migrated image is referenced from its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReference {
    /// The bare storage key. The query side prepends the public prefix.
    StorageKey,
    /// The fully qualified public URL of the stored object.
    PublicUrl,
}

/// Result of migrating one group's image.
#[derive(Debug)]
pub enum ImageOutcome {
    /// The group has no image.
    NoImage,
    /// The image was stored; holds the reference to put on the document.
    Migrated(String),
    /// Migration failed. The document keeps no image.
    Failed(MigrationError),
}

impl ImageOutcome {
    /// The image reference for the document, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Migrated(reference) => Some(reference),
            Self::NoImage | Self::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Fetches group images and re-hosts them in object storage.
pub struct AssetMigrator {
    fetcher: Arc<dyn ImageFetcher>,
    store: Arc<dyn ObjectStore>,
    reference: ImageReference,
}

impl AssetMigrator {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        store: Arc<dyn ObjectStore>,
        reference: ImageReference,
    ) -> Self {
        Self {
            fetcher,
            store,
            reference,
        }
    }

    /// Migrate the image of group `group_id`.
    ///
    /// Never fails the caller: download and storage errors are logged and
    /// reported as `ImageOutcome::Failed`.
    #[instrument(skip(self, image_url))]
    pub async fn migrate(&self, group_id: i64, image_url: Option<&str>) -> ImageOutcome {
        let url = match image_url {
            Some(url) if !url.is_empty() => url,
            _ => return ImageOutcome::NoImage,
        };

        match self.try_migrate(group_id, url).await {
            Ok(reference) => {
                debug!(group_id, reference = %reference, "Migrated group image");
                ImageOutcome::Migrated(reference)
            }
            Err(e) => {
                error!(group_id, error = %e, "Failed to upload image for group");
                ImageOutcome::Failed(e)
            }
        }
    }

    async fn try_migrate(&self, group_id: i64, url: &str) -> Result<String, MigrationError> {
        let image = self.fetcher.fetch(url).await.map_err(MigrationError::Fetch)?;

        let key = image_key(group_id);
        self.store
            .put_object(&key, image.bytes, image.content_type.as_deref())
            .await
            .map_err(MigrationError::Store)?;

        Ok(match self.reference {
            ImageReference::StorageKey => key,
            ImageReference::PublicUrl => self.store.public_url(&key),
        })
    }
}
