//! Records owned by the membership API.
//!
//! These types mirror what the source API returns. They are read-only to the
//! indexer: nothing here is ever written back.

use serde::{Deserialize, Serialize};

/// A group as described by the membership API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProfile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the group's image on the source system, if it has one.
    #[serde(default)]
    pub image_url: Option<String>,
    pub main_leader: Leader,
    #[serde(default)]
    pub current_members: i32,
    /// Maximum group size. `None` means unlimited.
    #[serde(default)]
    pub group_capacity: Option<i32>,
    #[serde(default)]
    pub childcare_provided: bool,
    #[serde(default)]
    pub listed: bool,
    #[serde(default)]
    pub public_search_listed: bool,
    #[serde(default)]
    pub active: bool,
    pub interaction_type: InteractionType,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub campus: SourceReference,
    pub group_type: SourceReference,
    pub department: SourceReference,
    pub area: SourceReference,
    pub meeting_day: SourceReference,
    pub meeting_time: SourceReference,
    #[serde(default)]
    pub custom_pulldown_fields: Vec<CustomPulldownFieldValue>,
}

/// The group's main leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A postal address attached to a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// How members of a group interact with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    MembersInteract,
    AnnouncementOnly,
    Administrative,
    #[serde(other)]
    Unknown,
}

/// A categorical value as the source API encodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub id: i64,
    pub name: String,
}

impl SourceReference {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The value selected for one of a group's custom pulldown fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPulldownFieldValue {
    /// Source name of the field, e.g. `udf_1`.
    pub name: String,
    /// Display label of the field.
    #[serde(default)]
    pub label: String,
    pub selection: PulldownSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulldownSelection {
    pub id: i64,
    pub label: String,
}

/// Label definition for a custom field, as returned by the custom field
/// labels lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub label: String,
}

/// One option of a lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTableEntry {
    pub id: i64,
    pub name: String,
}

impl LookupTableEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Lookup tables the indexer reads from the source API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupTableType {
    GroupType,
    MeetDay,
    UdfGrpPulldown1,
    UdfGrpPulldown2,
    UdfGrpPulldown3,
}

impl LookupTableType {
    /// Name of the table on the source API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroupType => "group_grouping",
            Self::MeetDay => "meet_day",
            Self::UdfGrpPulldown1 => "udf_grp_pulldown_1",
            Self::UdfGrpPulldown2 => "udf_grp_pulldown_2",
            Self::UdfGrpPulldown3 => "udf_grp_pulldown_3",
        }
    }

    /// Map a custom field name to the pulldown table that backs it.
    ///
    /// Only the three group pulldown fields are recognized.
    pub fn from_custom_field_name(name: &str) -> Option<Self> {
        match name {
            "udf_grp_pulldown_1" => Some(Self::UdfGrpPulldown1),
            "udf_grp_pulldown_2" => Some(Self::UdfGrpPulldown2),
            "udf_grp_pulldown_3" => Some(Self::UdfGrpPulldown3),
            _ => None,
        }
    }

    /// External facet id for a custom pulldown table.
    pub fn custom_field_id(&self) -> Option<&'static str> {
        match self {
            Self::UdfGrpPulldown1 => Some("udf_1"),
            Self::UdfGrpPulldown2 => Some("udf_2"),
            Self::UdfGrpPulldown3 => Some("udf_3"),
            Self::GroupType | Self::MeetDay => None,
        }
    }
}
