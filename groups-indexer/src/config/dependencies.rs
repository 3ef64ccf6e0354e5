//! Dependency initialization and wiring for the groups indexer.

use std::sync::Arc;
use tracing::info;

use super::Settings;
use crate::search::{GroupsSearchHandler, SearchFieldsHandler};
use crate::IndexingError;
use groups_indexer_pipeline::{
    AssetMigrator, FacetCache, FacetIds, GroupProcessor, GroupSink, IndexSink, SnapshotSink,
    SyncOrchestrator,
};
use groups_indexer_repository::opensearch::IndexConfig;
use groups_indexer_repository::{
    CcbClient, HttpImageFetcher, HttpObjectStore, ObjectStore, OpenSearchClient,
    SearchEngineClient,
};

/// Builds the components each command needs from one set of settings.
///
/// Every client is constructed once and handed to its components
/// explicitly.
pub struct Dependencies {
    settings: Settings,
}

impl Dependencies {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Initialize dependencies from environment variables.
    pub fn from_env() -> Result<Self, IndexingError> {
        Ok(Self::new(Settings::from_env()?))
    }

    /// Pipeline that bulk-writes groups into the search index.
    ///
    /// Verifies that the cluster is reachable before returning.
    pub async fn index_pipeline(&self) -> Result<SyncOrchestrator, IndexingError> {
        let source = self.group_source()?;
        let image_store = self.index_image_store()?;
        let search_client = self.search_client().await?;

        let healthy = search_client
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let sink: Arc<dyn GroupSink> = Arc::new(IndexSink::new(search_client));

        Ok(self.orchestrator(source, GroupProcessor::new(), image_store, sink))
    }

    /// Pipeline that writes all groups and facets as one snapshot object.
    pub fn snapshot_pipeline(&self) -> Result<SyncOrchestrator, IndexingError> {
        let source = self.group_source()?;
        let base_url = Settings::require(&self.settings.base_url, "BASE_URL")?;
        let image_store: Arc<dyn ObjectStore> = Arc::new(
            self.object_store(&self.settings.image_bucket, "IMAGE_BUCKET")?
                .with_public_base_url(base_url),
        );
        let output_store: Arc<dyn ObjectStore> =
            Arc::new(self.object_store(&self.settings.output_bucket, "OUTPUT_BUCKET")?);

        let facets = Arc::new(FacetCache::with_refresh_interval(
            source.clone(),
            FacetIds::DOCUMENT_FIELDS,
            self.settings.facet_refresh_interval,
        ));
        let sink: Arc<dyn GroupSink> = Arc::new(SnapshotSink::new(output_store, facets));

        let processor = match &self.settings.group_category_filter {
            Some(category) => GroupProcessor::with_category_filter(category.as_str()),
            None => GroupProcessor::new(),
        };

        Ok(self.orchestrator(source, processor, image_store, sink))
    }

    /// Handler serving group searches.
    pub async fn groups_search_handler(&self) -> Result<GroupsSearchHandler, IndexingError> {
        let prefix = Settings::require(&self.settings.image_url_prefix, "IMAGE_URL_PREFIX")?;
        let search_client = self.search_client().await?;

        Ok(GroupsSearchHandler::new(search_client, prefix))
    }

    /// Handler serving the facet definitions.
    pub fn search_fields_handler(&self) -> Result<SearchFieldsHandler, IndexingError> {
        let facets = FacetCache::with_refresh_interval(
            self.group_source()?,
            FacetIds::QUERY_PARAMS,
            self.settings.facet_refresh_interval,
        );

        Ok(SearchFieldsHandler::new(Arc::new(facets)))
    }

    fn orchestrator(
        &self,
        source: Arc<CcbClient>,
        processor: GroupProcessor,
        image_store: Arc<dyn ObjectStore>,
        sink: Arc<dyn GroupSink>,
    ) -> SyncOrchestrator {
        let migrator = AssetMigrator::new(
            Arc::new(HttpImageFetcher::new()),
            image_store,
            sink.image_reference(),
        );

        SyncOrchestrator::new(source, processor, migrator, sink)
    }

    fn group_source(&self) -> Result<Arc<CcbClient>, IndexingError> {
        let url = Settings::require(&self.settings.ccb_api_url, "CCB_API_URL")?;
        let user = Settings::require(&self.settings.ccb_api_user, "CCB_API_USER")?;
        let password = Settings::require(&self.settings.ccb_api_password, "CCB_API_PASSWORD")?;

        let client = CcbClient::new(url, user, password).map_err(|e| {
            IndexingError::config(format!("Failed to create membership API client: {}", e))
        })?;

        Ok(Arc::new(client))
    }

    async fn search_client(&self) -> Result<Arc<dyn SearchEngineClient>, IndexingError> {
        info!(
            opensearch_url = %self.settings.opensearch_url,
            index = %self.settings.groups_index,
            "Initializing search client"
        );

        let client = OpenSearchClient::new(
            &self.settings.opensearch_url,
            IndexConfig::new(self.settings.groups_index.as_str()),
        )
        .await
        .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        Ok(Arc::new(client))
    }

    /// Image store of the index pipeline. Indexed documents hold storage
    /// keys, so no public base URL is needed.
    fn index_image_store(&self) -> Result<Arc<dyn ObjectStore>, IndexingError> {
        let store = self.object_store(&self.settings.image_bucket, "IMAGE_BUCKET")?;
        Ok(Arc::new(store))
    }

    fn object_store(
        &self,
        bucket: &Option<String>,
        bucket_name: &str,
    ) -> Result<HttpObjectStore, IndexingError> {
        let endpoint = Settings::require(&self.settings.object_store_url, "OBJECT_STORE_URL")?;
        let bucket = Settings::require(bucket, bucket_name)?;

        HttpObjectStore::new(endpoint, bucket)
            .map_err(|e| IndexingError::config(format!("Failed to create object store: {}", e)))
    }
}
