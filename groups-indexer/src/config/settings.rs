//! Settings read from the environment.

use std::env;
use std::time::Duration;

use crate::IndexingError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default index holding the group documents.
const DEFAULT_GROUPS_INDEX: &str = "groups";

/// Default facet refresh interval, in seconds.
const DEFAULT_FACET_REFRESH_SECS: u64 = 900;

/// Default group type category required by the snapshot job.
const DEFAULT_GROUP_CATEGORY_FILTER: &str = "Community";

/// All externally supplied settings.
///
/// Settings needed only by some commands are optional here and checked by
/// the command that uses them.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ccb_api_url: Option<String>,
    pub ccb_api_user: Option<String>,
    pub ccb_api_password: Option<String>,
    pub opensearch_url: String,
    pub groups_index: String,
    pub object_store_url: Option<String>,
    pub image_bucket: Option<String>,
    pub output_bucket: Option<String>,
    /// Public base URL of the snapshot's image links.
    pub base_url: Option<String>,
    /// Public prefix prepended to image keys in search results.
    pub image_url_prefix: Option<String>,
    pub facet_refresh_interval: Duration,
    /// Empty disables the category filter.
    pub group_category_filter: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `CCB_API_URL`, `CCB_API_USER`, `CCB_API_PASSWORD`: membership API
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `GROUPS_INDEX`: index name (default: groups)
    /// - `OBJECT_STORE_URL`, `IMAGE_BUCKET`, `OUTPUT_BUCKET`: object storage
    /// - `BASE_URL`: public base URL of stored objects
    /// - `IMAGE_URL_PREFIX`: public prefix for image keys in search results
    /// - `FACET_REFRESH_SECS`: facet cache lifetime (default: 900)
    /// - `GROUP_CATEGORY_FILTER`: required group type category (default: Community)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let facet_refresh_secs = match get("FACET_REFRESH_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                IndexingError::config(format!("Invalid FACET_REFRESH_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_FACET_REFRESH_SECS,
        };

        let group_category_filter = match lookup("GROUP_CATEGORY_FILTER") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(value),
            None => Some(DEFAULT_GROUP_CATEGORY_FILTER.to_string()),
        };

        Ok(Self {
            ccb_api_url: get("CCB_API_URL"),
            ccb_api_user: get("CCB_API_USER"),
            ccb_api_password: get("CCB_API_PASSWORD"),
            opensearch_url: get("OPENSEARCH_URL")
                .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
            groups_index: get("GROUPS_INDEX").unwrap_or_else(|| DEFAULT_GROUPS_INDEX.to_string()),
            object_store_url: get("OBJECT_STORE_URL"),
            image_bucket: get("IMAGE_BUCKET"),
            output_bucket: get("OUTPUT_BUCKET"),
            base_url: get("BASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            image_url_prefix: get("IMAGE_URL_PREFIX")
                .map(|url| url.trim_end_matches('/').to_string()),
            facet_refresh_interval: Duration::from_secs(facet_refresh_secs),
            group_category_filter,
        })
    }

    /// Return a setting the current command cannot run without.
    pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, IndexingError> {
        value
            .as_deref()
            .ok_or_else(|| IndexingError::config(format!("{} must be set", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, IndexingError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.opensearch_url, "http://localhost:9200");
        assert_eq!(settings.groups_index, "groups");
        assert_eq!(settings.facet_refresh_interval, Duration::from_secs(900));
        assert_eq!(settings.group_category_filter.as_deref(), Some("Community"));
        assert!(settings.ccb_api_url.is_none());
    }

    #[test]
    fn test_values_from_lookup() {
        let settings = settings(&[
            ("CCB_API_URL", "https://church.ccbchurch.com/api.php"),
            ("GROUPS_INDEX", "groups-test"),
            ("BASE_URL", "https://groups.example.org/"),
            ("FACET_REFRESH_SECS", "60"),
            ("GROUP_CATEGORY_FILTER", ""),
        ])
        .unwrap();

        assert_eq!(
            settings.ccb_api_url.as_deref(),
            Some("https://church.ccbchurch.com/api.php")
        );
        assert_eq!(settings.groups_index, "groups-test");
        assert_eq!(settings.base_url.as_deref(), Some("https://groups.example.org"));
        assert_eq!(settings.facet_refresh_interval, Duration::from_secs(60));
        assert!(settings.group_category_filter.is_none());
    }

    #[test]
    fn test_invalid_refresh_interval() {
        let result = settings(&[("FACET_REFRESH_SECS", "soon")]);

        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_require_missing_setting() {
        let settings = settings(&[]).unwrap();

        let err = Settings::require(&settings.output_bucket, "OUTPUT_BUCKET").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: OUTPUT_BUCKET must be set");
    }
}
