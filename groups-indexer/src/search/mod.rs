//! Inbound query surfaces: group search and search-field listing.

mod handlers;
pub mod query_builder;
pub mod sanitize;

pub use handlers::{GroupsSearchHandler, SearchFieldsHandler};
pub use query_builder::build_group_query;
pub use sanitize::sanitize;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use groups_indexer_pipeline::PipelineError;
use groups_indexer_repository::SearchError;

/// Errors returned to callers of the query surfaces.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request itself is unusable. Not a server fault.
    #[error("{0}")]
    ClientInput(String),

    /// A collaborator failed while serving the request.
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    pub fn client_input(msg: impl Into<String>) -> Self {
        Self::ClientInput(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ClientInput(_) => 400,
            Self::Backend(_) => 500,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Response of a query surface: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Successful response carrying `body`.
    pub fn ok(body: Value) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    /// Error response with an `{"error": message}` body.
    pub fn error(err: &ApiError) -> Self {
        Self {
            status_code: err.status_code(),
            body: json!({ "error": err.to_string() }),
        }
    }

    /// Build a response from a handler result.
    pub fn from_result<T: Serialize>(result: Result<T, ApiError>) -> Self {
        match result.and_then(|value| serde_json::to_value(value).map_err(ApiError::from)) {
            Ok(body) => Self::ok(body),
            Err(err) => Self::error(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::client_input("bad").status_code(), 400);
        assert_eq!(ApiError::from(SearchError::query("boom")).status_code(), 500);
    }

    #[test]
    fn test_error_body() {
        let response = ApiResponse::error(&ApiError::client_input("Request must contain a query."));

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            json!({ "error": "Request must contain a query." })
        );
        assert!(!response.is_success());
    }

    #[test]
    fn test_from_result() {
        let ok = ApiResponse::from_result::<Vec<u32>>(Ok(vec![1, 2]));
        assert_eq!(ok.status_code, 200);
        assert_eq!(ok.body, json!([1, 2]));

        let err = ApiResponse::from_result::<Vec<u32>>(Err(ApiError::backend("index missing")));
        assert_eq!(err.status_code, 500);
        assert_eq!(err.body["error"], "index missing");
    }
}
