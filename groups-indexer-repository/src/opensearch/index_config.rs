//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the groups search index.

use serde_json::{json, Value};

/// The default name of the groups index.
pub const INDEX_NAME: &str = "groups";

/// Reference fields that can be filtered on by id.
const REFERENCE_FIELDS: [&str; 6] = [
    "campus",
    "groupType",
    "department",
    "area",
    "meetingDay",
    "meetingTime",
];

/// Index the client reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub name: String,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME)
    }
}

fn reference_mapping() -> Value {
    json!({
        "properties": {
            "id": { "type": "keyword" },
            "label": { "type": "text", "fields": { "raw": { "type": "keyword" } } }
        }
    })
}

/// Get the index settings and mappings for the groups search index.
///
/// The configuration includes:
/// - **text**: Full-text fields for name, description and leader name
/// - **keyword**: Reference ids and custom field ids, used for exact-match filters
/// - **boolean**: The group flags (childcare, listed, public, active)
///
/// Custom fields live under `udf` with arbitrary keys, so they are mapped
/// through a dynamic template rather than explicit properties.
pub fn get_index_settings() -> Value {
    let mut properties = json!({
        "id": { "type": "long" },
        "name": {
            "type": "text",
            "fields": { "raw": { "type": "keyword" } }
        },
        "description": { "type": "text" },
        "image-url": { "type": "keyword", "index": false },
        "leader-id": { "type": "long" },
        "leader-name": { "type": "text" },
        "leader-email": { "type": "keyword", "index": false },
        "location-city": { "type": "keyword" },
        "member-count": { "type": "integer" },
        "group-capacity": { "type": "integer" },
        "childcare": { "type": "boolean" },
        "listed": { "type": "boolean" },
        "public": { "type": "boolean" },
        "active": { "type": "boolean" },
        "udf": { "type": "object", "dynamic": true }
    });

    if let Some(map) = properties.as_object_mut() {
        for field in REFERENCE_FIELDS {
            map.insert(field.to_string(), reference_mapping());
        }
    }

    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "dynamic_templates": [
                {
                    "custom_field_ids": {
                        "path_match": "udf.*.id",
                        "mapping": { "type": "keyword" }
                    }
                },
                {
                    "custom_field_labels": {
                        "path_match": "udf.*.label",
                        "mapping": { "type": "text" }
                    }
                }
            ],
            "properties": properties
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        // Check settings exist
        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["name"]["type"], "text");
        assert_eq!(properties["childcare"]["type"], "boolean");

        // Reference ids must be keywords for exact-match filters
        for field in REFERENCE_FIELDS {
            assert_eq!(properties[field]["properties"]["id"]["type"], "keyword");
        }

        let templates = settings["mappings"]["dynamic_templates"].as_array().unwrap();
        assert_eq!(
            templates[0]["custom_field_ids"]["path_match"],
            "udf.*.id"
        );
    }

    #[test]
    fn test_index_name() {
        assert_eq!(INDEX_NAME, "groups");
        assert_eq!(IndexConfig::default().name, "groups");
    }
}
