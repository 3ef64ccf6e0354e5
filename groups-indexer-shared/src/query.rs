//! Structured search query.
//!
//! A `GroupQuery` is backend-neutral: an optional free-text clause that only
//! affects ranking, plus exact-match filters that are combined conjunctively.

/// Default number of hits returned by a search.
pub const DEFAULT_RESULT_SIZE: usize = 20;

/// Value of an exact-match filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Keyword(String),
    Bool(bool),
}

/// An exact-match, non-scoring filter on a document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
    /// Dotted path of the field, e.g. `groupType.id`.
    pub field: String,
    pub value: FilterValue,
}

impl TermFilter {
    pub fn keyword(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: FilterValue::Keyword(value.into()),
        }
    }

    pub fn boolean(field: impl Into<String>, value: bool) -> Self {
        Self {
            field: field.into(),
            value: FilterValue::Bool(value),
        }
    }
}

/// A search over the groups index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    /// Free-text relevance clause.
    pub text: Option<String>,
    pub filters: Vec<TermFilter>,
    pub size: usize,
}

impl Default for GroupQuery {
    fn default() -> Self {
        Self {
            text: None,
            filters: Vec::new(),
            size: DEFAULT_RESULT_SIZE,
        }
    }
}

impl GroupQuery {
    /// Set the free-text clause.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an exact-match filter.
    pub fn with_filter(mut self, filter: TermFilter) -> Self {
        self.filters.push(filter);
        self
    }
}
