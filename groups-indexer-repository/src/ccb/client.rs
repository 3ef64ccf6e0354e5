//! HTTP client for the membership API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SourceError;
use crate::interfaces::{GroupProfilesRequest, GroupSource};
use groups_indexer_shared::{CustomField, GroupProfile, LookupTableEntry, LookupTableType};

#[derive(Debug, Deserialize)]
struct GroupProfilesResponse {
    #[serde(default)]
    groups: Vec<GroupProfile>,
}

#[derive(Debug, Deserialize)]
struct CustomFieldLabelsResponse {
    #[serde(default)]
    custom_fields: Vec<CustomField>,
}

#[derive(Debug, Deserialize)]
struct LookupTableResponse {
    #[serde(default)]
    items: Vec<LookupTableEntry>,
}

/// Membership API client.
///
/// Every call is a `GET` against the single service endpoint, selecting the
/// operation through the `srv` query parameter and authenticating with HTTP
/// basic auth.
pub struct CcbClient {
    http: reqwest::Client,
    endpoint: Url,
    username: String,
    password: String,
}

impl CcbClient {
    /// Create a client for the API at `endpoint`.
    pub fn new(
        endpoint: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SourceError::request(e.to_string()))?;

        info!(endpoint = %endpoint, "Created membership API client");

        Ok(Self {
            http,
            endpoint,
            username: username.into(),
            password: password.into(),
        })
    }

    /// Build the URL for a service call.
    fn service_url(&self, service: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("srv", service);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    async fn call<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        debug!(url = %url, "Calling membership API");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| SourceError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Membership API request failed");
            return Err(SourceError::status(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::parse(e.to_string()))
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[async_trait]
impl GroupSource for CcbClient {
    #[instrument(skip(self))]
    async fn get_group_profiles(
        &self,
        request: &GroupProfilesRequest,
    ) -> Result<Vec<GroupProfile>, SourceError> {
        let url = self.service_url(
            "group_profiles",
            &[
                ("include_image_link", flag(request.include_image_url)),
                ("include_participants", flag(request.include_participants)),
            ],
        );

        let response: GroupProfilesResponse = self.call(url).await?;
        Ok(response.groups)
    }

    async fn get_custom_field_labels(&self) -> Result<Vec<CustomField>, SourceError> {
        let url = self.service_url("custom_field_labels", &[]);
        let response: CustomFieldLabelsResponse = self.call(url).await?;
        Ok(response.custom_fields)
    }

    async fn get_lookup_table(
        &self,
        table: LookupTableType,
    ) -> Result<Vec<LookupTableEntry>, SourceError> {
        let service = format!("{}_list", table.as_str());
        let url = self.service_url(&service, &[]);
        let response: LookupTableResponse = self.call(url).await?;
        Ok(response.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_url() {
        let client = CcbClient::new("https://church.example.org/api.php", "user", "secret").unwrap();

        let url = client.service_url(
            "group_profiles",
            &[("include_image_link", "true"), ("include_participants", "false")],
        );

        assert_eq!(
            url.as_str(),
            "https://church.example.org/api.php?srv=group_profiles&include_image_link=true&include_participants=false"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = CcbClient::new("not a url", "user", "secret");
        assert!(matches!(result, Err(SourceError::InvalidUrl(_))));
    }

    #[test]
    fn test_decode_lookup_table_response() {
        let body = r#"{"items": [{"id": 1, "name": "Monday"}, {"id": 2, "name": "Tuesday", "order": 2}]}"#;

        let response: LookupTableResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0], LookupTableEntry::new(1, "Monday"));
        assert_eq!(response.items[1], LookupTableEntry::new(2, "Tuesday"));
    }

    #[test]
    fn test_decode_group_profiles_response() {
        let body = r#"{
            "groups": [{
                "id": 12,
                "name": "Riverside Community",
                "image_url": "https://cdn.example.org/12.jpg",
                "main_leader": {"id": 3, "first_name": "Jane", "last_name": "Doe", "email": "jane@example.org"},
                "current_members": 8,
                "group_capacity": null,
                "childcare_provided": true,
                "listed": true,
                "public_search_listed": true,
                "active": true,
                "interaction_type": "MEMBERS_INTERACT",
                "addresses": [{"city": "Springfield"}],
                "campus": {"id": 1, "name": "Main"},
                "group_type": {"id": 3, "name": "Community"},
                "department": {"id": 4, "name": "Adults"},
                "area": {"id": 5, "name": "North"},
                "meeting_day": {"id": 2, "name": "Tuesday"},
                "meeting_time": {"id": 6, "name": "Evening"},
                "custom_pulldown_fields": [
                    {"name": "udf_1", "label": "Life Stage", "selection": {"id": 5, "label": "Young Adults"}}
                ]
            }]
        }"#;

        let response: GroupProfilesResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.groups.len(), 1);
        let group = &response.groups[0];
        assert_eq!(group.main_leader.last_name, "Doe");
        assert!(group.group_capacity.is_none());
        assert_eq!(group.addresses[0].city.as_deref(), Some("Springfield"));
        assert_eq!(group.custom_pulldown_fields[0].selection.id, 5);
    }
}
