//! Publication sources.
//!
//! A source turns an external registry's API responses into a
//! [`PublicationsDocument`](crate::models::PublicationsDocument). ORCID is the
//! only source today; its client lives in [`orcid`].

mod orcid;

pub use orcid::OrcidClient;

/// Errors that can occur when talking to a publication source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// API error from the source (non-success status)
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
