//! The aggregated snapshot written by the file sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GroupSearchDocument, SearchField};

/// All public groups plus the facets needed to filter them.
///
/// Written as a single object per run and fully replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupsSnapshot {
    #[serde(rename = "last-updated")]
    pub last_updated: DateTime<Utc>,
    pub groups: Vec<GroupSearchDocument>,
    #[serde(rename = "search-fields")]
    pub search_fields: Vec<SearchField>,
}

impl GroupsSnapshot {
    pub fn new(groups: Vec<GroupSearchDocument>, search_fields: Vec<SearchField>) -> Self {
        Self {
            last_updated: Utc::now(),
            groups,
            search_fields,
        }
    }
}
