//! OpenSearch query builders.
//!
//! This module renders a backend-neutral `GroupQuery` into the OpenSearch
//! query DSL.

use serde_json::{json, Map, Value};

use groups_indexer_shared::{FilterValue, GroupQuery, TermFilter};

/// Build an OpenSearch request body from a GroupQuery.
///
/// The free-text clause goes into `must` as a `simple_query_string`, so it
/// affects ranking. Every filter goes into `filter` as a `term` query, which
/// is non-scoring and combined conjunctively with everything else.
pub fn build_search_query(query: &GroupQuery) -> Value {
    let must: Vec<Value> = query
        .text
        .iter()
        .map(|text| build_text_clause(text))
        .collect();

    let filter: Vec<Value> = query.filters.iter().map(build_term_filter).collect();

    json!({
        "size": query.size,
        "query": {
            "bool": {
                "must": must,
                "filter": filter
            }
        }
    })
}

/// Build the free-text relevance clause.
fn build_text_clause(text: &str) -> Value {
    json!({
        "simple_query_string": {
            "query": text
        }
    })
}

/// Build an exact-match filter.
fn build_term_filter(filter: &TermFilter) -> Value {
    let value = match &filter.value {
        FilterValue::Keyword(keyword) => json!(keyword),
        FilterValue::Bool(flag) => json!(flag),
    };

    let mut term = Map::new();
    term.insert(filter.field.clone(), value);

    json!({ "term": term })
}
