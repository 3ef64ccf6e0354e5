//! Translation of request parameters into a structured group query.

use std::collections::HashMap;

use super::ApiError;
use groups_indexer_shared::{GroupQuery, TermFilter};

/// Message returned when a request carries no parameters.
pub const MISSING_QUERY_MESSAGE: &str = "Request must contain a query.";

/// Prefix of custom field parameters.
pub const CUSTOM_FIELD_PREFIX: &str = "udf_";

/// Parameters that filter on a reference id, with the field they filter.
const REFERENCE_FILTERS: [(&str, &str); 3] = [
    ("groupTypeId", "groupType.id"),
    ("campusId", "campus.id"),
    ("meetingDayId", "meetingDay.id"),
];

/// Build a group query from request parameters.
///
/// Unknown parameters are ignored. An absent or empty parameter set is a
/// client error.
pub fn build_group_query(params: Option<&HashMap<String, String>>) -> Result<GroupQuery, ApiError> {
    let params = match params {
        Some(params) if !params.is_empty() => params,
        _ => return Err(ApiError::client_input(MISSING_QUERY_MESSAGE)),
    };

    let mut query = GroupQuery::default();

    if let Some(text) = params.get("q") {
        query = query.with_text(text.as_str());
    }

    for (param, field) in REFERENCE_FILTERS {
        if let Some(id) = params.get(param) {
            query = query.with_filter(TermFilter::keyword(field, id.as_str()));
        }
    }

    if let Some(childcare) = params.get("childcare") {
        query = query.with_filter(TermFilter::boolean("childcare", parse_bool(childcare)));
    }

    let mut custom: Vec<(&String, &String)> = params
        .iter()
        .filter(|(name, _)| name.starts_with(CUSTOM_FIELD_PREFIX))
        .collect();
    custom.sort();

    for (name, id) in custom {
        query = query.with_filter(TermFilter::keyword(format!("udf.{}.id", name), id.as_str()));
    }

    Ok(query)
}

/// Lenient boolean parsing: anything but a case-insensitive `true` is false.
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use groups_indexer_shared::FilterValue;
    use groups_indexer_shared::query::DEFAULT_RESULT_SIZE;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_params_is_client_error() {
        let err = build_group_query(None).unwrap_err();

        assert!(matches!(err, ApiError::ClientInput(_)));
        assert_eq!(err.to_string(), MISSING_QUERY_MESSAGE);
    }

    #[test]
    fn test_empty_params_is_client_error() {
        let empty = HashMap::new();

        let err = build_group_query(Some(&empty)).unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_text_reference_and_custom_filters() {
        let params = params(&[("q", "yoga"), ("groupTypeId", "3"), ("udf_1", "5")]);

        let query = build_group_query(Some(&params)).unwrap();

        assert_eq!(query.text.as_deref(), Some("yoga"));
        assert_eq!(
            query.filters,
            vec![
                TermFilter::keyword("groupType.id", "3"),
                TermFilter::keyword("udf.udf_1.id", "5"),
            ]
        );
        assert_eq!(query.size, DEFAULT_RESULT_SIZE);
    }

    #[test]
    fn test_all_reference_filters() {
        let params = params(&[("campusId", "1"), ("meetingDayId", "2"), ("groupTypeId", "3")]);

        let query = build_group_query(Some(&params)).unwrap();

        assert!(query.text.is_none());
        assert_eq!(
            query.filters,
            vec![
                TermFilter::keyword("groupType.id", "3"),
                TermFilter::keyword("campus.id", "1"),
                TermFilter::keyword("meetingDay.id", "2"),
            ]
        );
    }

    #[test]
    fn test_childcare_parsing_is_lenient() {
        for (raw, expected) in [("true", true), ("TRUE", true), ("false", false), ("yes", false)] {
            let params = params(&[("childcare", raw)]);

            let query = build_group_query(Some(&params)).unwrap();

            assert_eq!(query.filters.len(), 1);
            assert_eq!(query.filters[0].field, "childcare");
            assert_eq!(query.filters[0].value, FilterValue::Bool(expected), "input {}", raw);
        }
    }

    #[test]
    fn test_childcare_with_whitespace_is_false() {
        let params = params(&[("childcare", " true ")]);

        let query = build_group_query(Some(&params)).unwrap();

        assert_eq!(query.filters[0].value, FilterValue::Bool(false));
    }

    #[test]
    fn test_multiple_custom_fields_all_apply() {
        let params = params(&[("udf_3", "7"), ("udf_1", "5"), ("page", "2")]);

        let query = build_group_query(Some(&params)).unwrap();

        assert_eq!(
            query.filters,
            vec![
                TermFilter::keyword("udf.udf_1.id", "5"),
                TermFilter::keyword("udf.udf_3.id", "7"),
            ]
        );
    }
}
