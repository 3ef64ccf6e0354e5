//! Loader module for the groups indexer pipeline.
//!
//! Writes the documents of one run to a sink. Both sinks write the whole set
//! at once; there is no incremental flushing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::assets::ImageReference;
use crate::errors::PipelineError;
use crate::facets::FacetCache;
use groups_indexer_repository::{ObjectStore, SearchEngineClient};
use groups_indexer_shared::{GroupSearchDocument, GroupsSnapshot, SearchField};

/// Storage key of the snapshot object.
pub const SNAPSHOT_KEY: &str = "data/groups-data.json";

/// Destination of a synchronization run.
#[async_trait]
pub trait GroupSink: Send + Sync {
    /// How documents written to this sink reference their images.
    fn image_reference(&self) -> ImageReference;

    /// Get the sink ready before any group is processed.
    async fn prepare(&self) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Write the complete document set of a run.
    async fn write(&self, documents: Vec<GroupSearchDocument>) -> Result<(), PipelineError>;
}

/// Sink that bulk-indexes documents into the search engine.
pub struct IndexSink {
    client: Arc<dyn SearchEngineClient>,
}

impl IndexSink {
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GroupSink for IndexSink {
    fn image_reference(&self) -> ImageReference {
        ImageReference::StorageKey
    }

    async fn prepare(&self) -> Result<(), PipelineError> {
        self.client.ensure_index_exists().await?;
        Ok(())
    }

    /// Submit every document in a single bulk request.
    ///
    /// Any item failure reported by the engine fails the whole write.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn write(&self, documents: Vec<GroupSearchDocument>) -> Result<(), PipelineError> {
        if documents.is_empty() {
            info!("No documents to index");
            return Ok(());
        }

        self.client.bulk_index(&documents).await?;

        debug!(count = documents.len(), "Successfully indexed documents");
        Ok(())
    }
}

/// Sink that writes all groups and facets as one snapshot object.
///
/// Facets are loaded in `prepare`, so a facet outage fails the run before
/// any image is migrated.
pub struct SnapshotSink {
    store: Arc<dyn ObjectStore>,
    facets: Arc<FacetCache>,
    prepared: Mutex<Option<Arc<Vec<SearchField>>>>,
    key: String,
}

impl SnapshotSink {
    pub fn new(store: Arc<dyn ObjectStore>, facets: Arc<FacetCache>) -> Self {
        Self {
            store,
            facets,
            prepared: Mutex::new(None),
            key: SNAPSHOT_KEY.to_string(),
        }
    }

    /// Build the snapshot for `documents`.
    ///
    /// Uses the facets loaded by `prepare`, or reads them from the cache when
    /// the sink was not prepared. Leader emails are dropped since the
    /// snapshot is publicly readable.
    pub async fn build_snapshot(
        &self,
        mut documents: Vec<GroupSearchDocument>,
    ) -> Result<GroupsSnapshot, PipelineError> {
        let prepared = self.prepared.lock().await.clone();
        let facets = match prepared {
            Some(facets) => facets,
            None => self.facets.get_facets().await?,
        };

        for doc in &mut documents {
            doc.leader_email = None;
        }

        Ok(GroupsSnapshot::new(documents, facets.as_ref().clone()))
    }
}

#[async_trait]
impl GroupSink for SnapshotSink {
    fn image_reference(&self) -> ImageReference {
        ImageReference::PublicUrl
    }

    async fn prepare(&self) -> Result<(), PipelineError> {
        let facets = self.facets.get_facets().await?;
        debug!(count = facets.len(), "Loaded facets for snapshot");

        *self.prepared.lock().await = Some(facets);
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn write(&self, documents: Vec<GroupSearchDocument>) -> Result<(), PipelineError> {
        let snapshot = self.build_snapshot(documents).await?;
        let body = serde_json::to_vec(&snapshot)?;

        self.store
            .put_object(&self.key, body, Some("application/json"))
            .await?;

        info!(key = %self.key, groups = snapshot.groups.len(), "Wrote groups snapshot");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assets::tests::MockStore;
    use crate::facets::tests::MockSource;
    use crate::facets::FacetIds;
    use groups_indexer_repository::{SearchError, SearchHit};
    use groups_indexer_shared::GroupQuery;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Search engine recording bulk writes.
    pub(crate) struct MockSearchClient {
        pub(crate) indexed: Mutex<Vec<GroupSearchDocument>>,
        pub(crate) bulk_calls: AtomicUsize,
        pub(crate) index_ensured: AtomicBool,
        fail_bulk: bool,
    }

    impl MockSearchClient {
        pub(crate) fn new() -> Self {
            Self {
                indexed: Mutex::new(Vec::new()),
                bulk_calls: AtomicUsize::new(0),
                index_ensured: AtomicBool::new(false),
                fail_bulk: false,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail_bulk: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for MockSearchClient {
        async fn search(&self, _query: &GroupQuery) -> Result<Vec<SearchHit>, SearchError> {
            Ok(Vec::new())
        }

        async fn bulk_index(&self, documents: &[GroupSearchDocument]) -> Result<(), SearchError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_bulk {
                return Err(SearchError::bulk_index(
                    "failure in bulk execution:\n[0]: id [1], message [mapper_parsing_exception]",
                ));
            }
            self.indexed.lock().unwrap().extend_from_slice(documents);
            Ok(())
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchError> {
            self.index_ensured.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn document(id: i64) -> GroupSearchDocument {
        GroupSearchDocument {
            id,
            name: format!("Group {}", id),
            leader_name: "Jane D.".to_string(),
            leader_email: Some("jane@example.org".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_index_sink_single_bulk_write() {
        let client = Arc::new(MockSearchClient::new());
        let sink = IndexSink::new(client.clone());

        sink.prepare().await.unwrap();
        sink.write(vec![document(1), document(2)]).await.unwrap();

        assert!(client.index_ensured.load(Ordering::SeqCst));
        assert_eq!(client.bulk_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.indexed.lock().unwrap().len(), 2);
        assert_eq!(sink.image_reference(), ImageReference::StorageKey);
    }

    #[tokio::test]
    async fn test_index_sink_skips_empty_write() {
        let client = Arc::new(MockSearchClient::new());
        let sink = IndexSink::new(client.clone());

        sink.write(Vec::new()).await.unwrap();

        assert_eq!(client.bulk_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_index_sink_bulk_failure_is_fatal() {
        let sink = IndexSink::new(Arc::new(MockSearchClient::failing()));

        let result = sink.write(vec![document(1)]).await;

        match result {
            Err(PipelineError::SearchError(e)) => {
                assert!(e.to_string().contains("mapper_parsing_exception"));
            }
            other => panic!("expected search error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_snapshot_sink_writes_single_object() {
        let store = Arc::new(MockStore::new());
        let facets = Arc::new(FacetCache::new(
            Arc::new(MockSource::new()),
            FacetIds::DOCUMENT_FIELDS,
        ));
        let sink = SnapshotSink::new(store.clone(), facets);

        sink.write(vec![document(1), document(2)]).await.unwrap();

        let objects = store.objects.lock().await;
        assert_eq!(objects.len(), 1);

        let body = objects.get(SNAPSHOT_KEY).unwrap();
        let snapshot: GroupsSnapshot = serde_json::from_slice(body).unwrap();
        assert_eq!(snapshot.groups.len(), 2);
        assert!(snapshot.groups.iter().all(|g| g.leader_email.is_none()));
        assert_eq!(snapshot.search_fields[0].id, "groupType");
        assert_eq!(snapshot.search_fields.last().unwrap().id, "childcare");
    }

    #[tokio::test]
    async fn test_snapshot_sink_requires_facets() {
        let store = Arc::new(MockStore::new());
        let source = MockSource::new();
        source.fail_lookups.store(true, Ordering::SeqCst);
        let facets = Arc::new(FacetCache::new(Arc::new(source), FacetIds::DOCUMENT_FIELDS));
        let sink = SnapshotSink::new(store.clone(), facets);

        let result = sink.write(vec![document(1)]).await;

        assert!(matches!(result, Err(PipelineError::FacetsUnavailable(_))));
        assert!(store.objects.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_sink_prepare_fails_without_facets() {
        let source = MockSource::new();
        source.fail_lookups.store(true, Ordering::SeqCst);
        let facets = Arc::new(FacetCache::new(Arc::new(source), FacetIds::DOCUMENT_FIELDS));
        let sink = SnapshotSink::new(Arc::new(MockStore::new()), facets);

        let result = sink.prepare().await;

        assert!(matches!(result, Err(PipelineError::FacetsUnavailable(_))));
    }

    #[tokio::test]
    async fn test_snapshot_sink_writes_prepared_facets() {
        let source = Arc::new(MockSource::new());
        let store = Arc::new(MockStore::new());
        let facets = Arc::new(FacetCache::new(source.clone(), FacetIds::DOCUMENT_FIELDS));
        let sink = SnapshotSink::new(store.clone(), facets);

        sink.prepare().await.unwrap();
        let lookups = source.lookup_calls.load(Ordering::SeqCst);
        sink.write(vec![document(1)]).await.unwrap();

        assert_eq!(source.lookup_calls.load(Ordering::SeqCst), lookups);
        let objects = store.objects.lock().await;
        let snapshot: GroupsSnapshot =
            serde_json::from_slice(objects.get(SNAPSHOT_KEY).unwrap()).unwrap();
        assert_eq!(snapshot.search_fields[0].id, "groupType");
    }

    #[tokio::test]
    async fn test_snapshot_sink_store_failure_is_fatal() {
        let facets = Arc::new(FacetCache::new(
            Arc::new(MockSource::new()),
            FacetIds::DOCUMENT_FIELDS,
        ));
        let sink = SnapshotSink::new(Arc::new(MockStore::failing()), facets);

        let result = sink.write(vec![document(1)]).await;

        assert!(matches!(result, Err(PipelineError::StorageError(_))));
    }
}
