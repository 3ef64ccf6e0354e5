//! Membership API trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;
use groups_indexer_shared::{CustomField, GroupProfile, LookupTableEntry, LookupTableType};

/// Options for fetching group profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupProfilesRequest {
    /// Ask the API to include each group's image link.
    pub include_image_url: bool,
    /// Ask the API to include participant rosters.
    pub include_participants: bool,
}

impl GroupProfilesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_image_url(mut self, include: bool) -> Self {
        self.include_image_url = include;
        self
    }

    pub fn with_include_participants(mut self, include: bool) -> Self {
        self.include_participants = include;
        self
    }
}

/// Read-only access to the authoritative membership API.
#[async_trait]
pub trait GroupSource: Send + Sync {
    /// Fetch every group profile in one call.
    async fn get_group_profiles(
        &self,
        request: &GroupProfilesRequest,
    ) -> Result<Vec<GroupProfile>, SourceError>;

    /// Fetch the label definitions of all custom fields.
    async fn get_custom_field_labels(&self) -> Result<Vec<CustomField>, SourceError>;

    /// Fetch every option of a lookup table, in source order.
    async fn get_lookup_table(
        &self,
        table: LookupTableType,
    ) -> Result<Vec<LookupTableEntry>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_profiles_request_builder() {
        let request = GroupProfilesRequest::new()
            .with_include_image_url(true)
            .with_include_participants(false);

        assert!(request.include_image_url);
        assert!(!request.include_participants);
    }
}
