//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::{SearchEngineClient, SearchHit};
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries::build_search_query;
use groups_indexer_shared::{GroupQuery, GroupSearchDocument};

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use groups_indexer_repository::opensearch::IndexConfig;
/// let client = OpenSearchClient::new("http://localhost:9200", IndexConfig::default()).await?;
///
/// client.ensure_index_exists().await?;
/// client.bulk_index(&documents).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index to read from and write to
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %index_config.name, "Created OpenSearch client");

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Parse a raw hit from the search response.
    fn parse_hit(hit: &Value) -> Result<SearchHit, SearchError> {
        let source = hit
            .get("_source")
            .cloned()
            .ok_or_else(|| SearchError::parse("search hit has no _source"))?;
        let id = hit
            .get("_id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .or_else(|| source.get("id").map(|id| id.to_string()))
            .ok_or_else(|| SearchError::parse("search hit has no id"))?;

        Ok(SearchHit { id, source })
    }

    /// Parse every hit of a search response, in rank order.
    fn parse_hits(response: &Value) -> Result<Vec<SearchHit>, SearchError> {
        match response["hits"]["hits"].as_array() {
            Some(hits) => hits.iter().map(Self::parse_hit).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Collect the per-item failures of a bulk response into one message.
    ///
    /// Returns `None` when the response reports no errors.
    fn bulk_failure_message(response: &Value) -> Option<String> {
        if !response
            .get("errors")
            .and_then(|e| e.as_bool())
            .unwrap_or(false)
        {
            return None;
        }

        let failures: Vec<String> = response
            .get("items")
            .and_then(|items| items.as_array())
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(position, item)| {
                        let action = item.get("index")?;
                        let error = action.get("error")?;
                        let id = action.get("_id").and_then(|v| v.as_str()).unwrap_or("?");
                        let reason = error
                            .get("reason")
                            .and_then(|v| v.as_str())
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string());
                        Some(format!("[{}]: id [{}], message [{}]", position, id, reason))
                    })
                    .collect()
            })
            .unwrap_or_default();

        if failures.is_empty() {
            return Some("bulk request reported errors without item details".to_string());
        }

        Some(format!(
            "failure in bulk execution:\n{}",
            failures.join("\n")
        ))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self, query))]
    async fn search(&self, query: &GroupQuery) -> Result<Vec<SearchHit>, SearchError> {
        let body = build_search_query(query);
        debug!(index = %self.index_config.name, query = %body, "Executing search");

        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_config.name]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Self::parse_hits(&response_body)
    }

    /// Index all documents with a single bulk request.
    ///
    /// Any failed item fails the whole call with the aggregated reasons.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    async fn bulk_index(&self, documents: &[GroupSearchDocument]) -> Result<(), SearchError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(
                json!({"index": {"_index": self.index_config.name, "_id": document.document_id()}})
                    .into(),
            );
            body.push(serde_json::to_value(document)?.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        if let Some(message) = Self::bulk_failure_message(&response_body) {
            error!(message = %message, "Bulk request had item failures");
            return Err(SearchError::bulk_index(message));
        }

        debug!(count = documents.len(), "Documents indexed");
        Ok(())
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&self.index_config.name]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %self.index_config.name, "Index already exists");
            return Ok(());
        }

        info!(index = %self.index_config.name, "Creating index");

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_config.name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another writer may have created it between the two calls
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(body["status"].as_str().map_or(false, |status| status != "red"))
    }
}
