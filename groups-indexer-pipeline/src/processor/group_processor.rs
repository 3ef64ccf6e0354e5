//! Group processor implementation.
//!
//! Decides which groups are publicly searchable and transforms those into
//! GroupSearchDocument structures for indexing.

use std::fmt;

use tracing::info;

use super::transform::transform;
use groups_indexer_shared::{GroupProfile, GroupSearchDocument, InteractionType};

/// Why a group was left out of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Inactive, not listed in public search, or not a members-interact group.
    NotPublic,
    /// The group's type does not contain the required category.
    CategoryMismatch { group_type: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPublic => write!(f, "inactive/unlisted group"),
            Self::CategoryMismatch { group_type } => {
                write!(f, "group type '{}' is out of category", group_type)
            }
        }
    }
}

/// Processed result from the group processor.
#[derive(Debug)]
pub enum ProcessedGroup {
    /// Document to be indexed.
    Include(GroupSearchDocument),
    /// Group left out of the index.
    Skip(SkipReason),
}

/// Processor that filters groups and transforms them into search documents.
///
/// The processor is responsible for:
/// - Keeping only active, publicly listed, members-interact groups
/// - Optionally keeping only groups whose type names a category
/// - Converting the remaining groups to GroupSearchDocument structures
#[derive(Debug, Clone, Default)]
pub struct GroupProcessor {
    category_filter: Option<String>,
}

impl GroupProcessor {
    /// Create a processor applying only the public-visibility filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor that additionally requires the group type name to
    /// contain `category`.
    pub fn with_category_filter(category: impl Into<String>) -> Self {
        Self {
            category_filter: Some(category.into()),
        }
    }

    /// Check whether a group belongs in the index.
    pub fn evaluate(&self, profile: &GroupProfile) -> Result<(), SkipReason> {
        if !profile.active
            || !profile.public_search_listed
            || profile.interaction_type != InteractionType::MembersInteract
        {
            return Err(SkipReason::NotPublic);
        }

        if let Some(category) = &self.category_filter {
            if !profile.group_type.name.contains(category.as_str()) {
                return Err(SkipReason::CategoryMismatch {
                    group_type: profile.group_type.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Process a single group.
    pub fn process(&self, profile: &GroupProfile) -> ProcessedGroup {
        match self.evaluate(profile) {
            Ok(()) => ProcessedGroup::Include(transform(profile)),
            Err(reason) => {
                info!(group = %profile.name, reason = %reason, "Skipping group");
                ProcessedGroup::Skip(reason)
            }
        }
    }
}
