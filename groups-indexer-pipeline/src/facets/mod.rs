//! Facet cache for the groups indexer.
//!
//! Facets are the dropdown filters shown to searchers. Their options live in
//! lookup tables on the membership API, which change rarely, so the list is
//! rebuilt at most once per refresh interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use groups_indexer_repository::{GroupSource, SourceError};
use groups_indexer_shared::{LookupTableType, SearchField, StringPair};

/// Default time a built facet list stays fresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Ids given to the built-in facets.
///
/// The query surface names facets after its request parameters, while the
/// snapshot names them after the document fields they filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetIds {
    pub group_type: &'static str,
    pub meeting_day: &'static str,
}

impl FacetIds {
    /// Ids matching the search request parameters.
    pub const QUERY_PARAMS: FacetIds = FacetIds {
        group_type: "groupTypeId",
        meeting_day: "meetingDayId",
    };

    /// Ids matching the search document fields.
    pub const DOCUMENT_FIELDS: FacetIds = FacetIds {
        group_type: "groupType",
        meeting_day: "meetingDay",
    };
}

#[derive(Debug, Default)]
struct CacheState {
    facets: Option<Arc<Vec<SearchField>>>,
    last_refresh: Option<Instant>,
}

/// Time-bounded cache of facet definitions.
///
/// The state lock is held for the whole refresh, so at most one refresh runs
/// at a time and callers arriving meanwhile wait for its result.
pub struct FacetCache {
    source: Arc<dyn GroupSource>,
    ids: FacetIds,
    refresh_interval: Duration,
    state: Mutex<CacheState>,
}

impl FacetCache {
    /// Create a cache with the default refresh interval.
    pub fn new(source: Arc<dyn GroupSource>, ids: FacetIds) -> Self {
        Self::with_refresh_interval(source, ids, DEFAULT_REFRESH_INTERVAL)
    }

    /// Create a cache with a custom refresh interval.
    pub fn with_refresh_interval(
        source: Arc<dyn GroupSource>,
        ids: FacetIds,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            source,
            ids,
            refresh_interval,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Get the current facet list.
    ///
    /// # Returns
    ///
    /// * `Ok(facets)` - The cached list if still fresh, otherwise a rebuilt
    ///   one. If a rebuild fails but an older list exists, the older list.
    /// * `Err(PipelineError::FacetsUnavailable)` - If the rebuild failed and
    ///   nothing was cached yet
    #[instrument(skip(self))]
    pub async fn get_facets(&self) -> Result<Arc<Vec<SearchField>>, PipelineError> {
        let mut state = self.state.lock().await;

        if let (Some(facets), Some(last_refresh)) = (&state.facets, state.last_refresh) {
            if last_refresh.elapsed() < self.refresh_interval {
                debug!("Using cached search fields");
                return Ok(Arc::clone(facets));
            }
        }

        info!("Fetching search fields from membership API");

        match self.build_facets().await {
            Ok(facets) => {
                let facets = Arc::new(facets);
                state.facets = Some(Arc::clone(&facets));
                state.last_refresh = Some(Instant::now());
                Ok(facets)
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch search fields");
                match &state.facets {
                    Some(stale) => {
                        warn!("Serving stale search fields");
                        Ok(Arc::clone(stale))
                    }
                    None => Err(PipelineError::facets_unavailable(e.to_string())),
                }
            }
        }
    }

    /// Build the facet list in its fixed order: group type, day, custom
    /// pulldowns, childcare.
    async fn build_facets(&self) -> Result<Vec<SearchField>, SourceError> {
        let labels = self.source.get_custom_field_labels().await?;

        let mut facets = vec![
            SearchField::new(
                self.ids.group_type,
                "Group Type",
                self.options(LookupTableType::GroupType).await?,
            ),
            // TODO: add a "Campus" facet once the source exposes a campus list
            SearchField::new(
                self.ids.meeting_day,
                "Day",
                self.options(LookupTableType::MeetDay).await?,
            ),
        ];

        for field in &labels {
            let Some(table) = LookupTableType::from_custom_field_name(&field.name) else {
                continue;
            };
            let Some(id) = table.custom_field_id() else {
                continue;
            };
            facets.push(SearchField::new(
                id,
                field.label.clone(),
                self.options(table).await?,
            ));
        }

        facets.push(SearchField::new(
            "childcare",
            "Childcare",
            vec![StringPair::of("true", "Yes"), StringPair::of("false", "No")],
        ));

        Ok(facets)
    }

    async fn options(&self, table: LookupTableType) -> Result<Vec<StringPair>, SourceError> {
        let entries = self.source.get_lookup_table(table).await?;

        Ok(entries
            .into_iter()
            .map(|entry| StringPair::of(entry.id.to_string(), entry.name))
            .collect())
    }
}
