//! Source API error types.

use thiserror::Error;

/// Errors returned by the membership API client.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The API answered with a non-success status.
    #[error("Source API returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The client was configured with an unusable URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SourceError {
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
