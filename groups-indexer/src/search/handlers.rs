//! Request handlers for the query surfaces.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::{build_group_query, sanitize, ApiError, ApiResponse};
use groups_indexer_pipeline::FacetCache;
use groups_indexer_repository::SearchEngineClient;
use groups_indexer_shared::{GroupSearchDocument, SearchField};

/// Serves filtered group searches.
pub struct GroupsSearchHandler {
    client: Arc<dyn SearchEngineClient>,
    image_url_prefix: String,
}

impl GroupsSearchHandler {
    pub fn new(client: Arc<dyn SearchEngineClient>, image_url_prefix: impl Into<String>) -> Self {
        Self {
            client,
            image_url_prefix: image_url_prefix.into(),
        }
    }

    /// Run a search and return sanitized documents in rank order.
    #[instrument(skip(self, params))]
    pub async fn search(
        &self,
        params: Option<&HashMap<String, String>>,
    ) -> Result<Vec<GroupSearchDocument>, ApiError> {
        let query = build_group_query(params)?;

        let hits = self.client.search(&query).await.map_err(|e| {
            error!(error = %e, "Group search failed");
            ApiError::from(e)
        })?;

        hits.into_iter()
            .map(|hit| -> Result<GroupSearchDocument, ApiError> {
                let doc: GroupSearchDocument =
                    serde_json::from_value(hit.source).map_err(|e| {
                        error!(hit_id = %hit.id, error = %e, "Failed to decode search hit");
                        ApiError::from(e)
                    })?;
                Ok(sanitize(doc, &self.image_url_prefix))
            })
            .collect()
    }

    /// Run a search and render the result as a response.
    pub async fn handle(&self, params: Option<&HashMap<String, String>>) -> ApiResponse {
        let result = self.search(params).await;

        match &result {
            Ok(groups) => info!(count = groups.len(), "Returning groups"),
            Err(ApiError::ClientInput(msg)) => warn!(message = %msg, "Rejected search request"),
            Err(ApiError::Backend(_)) => {}
        }

        ApiResponse::from_result(result)
    }
}

/// Serves the facet definitions used to build search filters.
pub struct SearchFieldsHandler {
    facets: Arc<FacetCache>,
}

impl SearchFieldsHandler {
    pub fn new(facets: Arc<FacetCache>) -> Self {
        Self { facets }
    }

    /// Current facet definitions.
    pub async fn fields(&self) -> Result<Arc<Vec<SearchField>>, ApiError> {
        Ok(self.facets.get_facets().await?)
    }

    pub async fn handle(&self) -> ApiResponse {
        let result = self.fields().await.map(|fields| fields.as_ref().clone());
        ApiResponse::from_result(result)
    }
}
