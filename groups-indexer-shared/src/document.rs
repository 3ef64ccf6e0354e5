//! Search document types.
//!
//! A `GroupSearchDocument` is the projection of a group that gets indexed and
//! served to searchers. Each sync run builds a complete replacement set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A normalized categorical value.
///
/// `id` is always the string form of the source's numeric identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub label: String,
}

impl Reference {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A group as stored in the search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSearchDocument {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Storage key or public URL of the group's image, depending on the sink.
    #[serde(rename = "image-url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "leader-id")]
    pub leader_id: i64,
    /// First name followed by last-name initials, e.g. `Jane D.`.
    #[serde(rename = "leader-name")]
    pub leader_name: String,
    /// Only present in the internal form. Cleared before any public response.
    #[serde(
        rename = "leader-email",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub leader_email: Option<String>,
    #[serde(rename = "location-city", default)]
    pub location_city: Option<String>,
    #[serde(rename = "member-count", default)]
    pub current_members: i32,
    /// `None` means the group has no capacity limit.
    #[serde(rename = "group-capacity", default)]
    pub group_capacity: Option<i32>,
    #[serde(rename = "childcare", default)]
    pub childcare_provided: bool,
    #[serde(default)]
    pub listed: bool,
    #[serde(rename = "public", default)]
    pub public_search_listed: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(rename = "udf", default)]
    pub custom_fields: BTreeMap<String, Reference>,
    #[serde(default)]
    pub campus: Reference,
    #[serde(rename = "groupType", default)]
    pub group_type: Reference,
    #[serde(default)]
    pub department: Reference,
    #[serde(default)]
    pub area: Reference,
    #[serde(rename = "meetingDay", default)]
    pub meeting_day: Reference,
    #[serde(rename = "meetingTime", default)]
    pub meeting_time: Reference,
}

impl GroupSearchDocument {
    /// Whether the group accepts any number of members.
    pub fn is_capacity_unlimited(&self) -> bool {
        self.group_capacity.is_none()
    }

    /// The id used for the document in the search index.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}
