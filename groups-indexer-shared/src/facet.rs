//! Facet definitions.

use serde::{Deserialize, Serialize};

/// A key/value pair of strings, used for facet options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringPair {
    pub key: String,
    pub value: String,
}

impl StringPair {
    pub fn of(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A pulldown filter and its options, as shown to searchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchField {
    pub id: String,
    pub label: String,
    pub values: Vec<StringPair>,
}

impl SearchField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, values: Vec<StringPair>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            values,
        }
    }
}
