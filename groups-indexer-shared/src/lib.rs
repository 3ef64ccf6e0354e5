//! # Groups Indexer Shared
//!
//! Shared data structures for the groups indexer: the source records read
//! from the membership API, the search documents written to the index, the
//! facet definitions served to searchers, and the structured search query.

pub mod document;
pub mod facet;
pub mod query;
pub mod snapshot;
pub mod source;

pub use document::{GroupSearchDocument, Reference};
pub use facet::{SearchField, StringPair};
pub use query::{FilterValue, GroupQuery, TermFilter};
pub use snapshot::GroupsSnapshot;
pub use source::{
    Address, CustomField, CustomPulldownFieldValue, GroupProfile, InteractionType, Leader,
    LookupTableEntry, LookupTableType, PulldownSelection, SourceReference,
};
