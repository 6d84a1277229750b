//! Contentful client error types.

use std::sync::Arc;

/// Errors from the Contentful Delivery API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentfulError {
    /// Space id or access token not configured.
    #[error("missing credentials: {0} not set")]
    MissingCredentials(&'static str),

    /// Query parameters out of range.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Authentication failed (invalid or revoked access token).
    #[error("authentication failed: access token rejected")]
    AuthError,

    /// Rate limited by the Delivery API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// Space or environment does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body was not valid JSON for the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response parsed but lacks the `items` array.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ContentfulError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ContentfulError::Timeout } else { ContentfulError::Network(Arc::new(err)) }
    }
}

impl From<ContentfulError> for techlens_core::Error {
    fn from(err: ContentfulError) -> Self {
        use techlens_core::Error;

        match err {
            ContentfulError::MissingCredentials(_) => Error::Configuration(err.to_string()),
            ContentfulError::InvalidQuery(msg) => Error::Validation(msg),
            ContentfulError::Parse(_) | ContentfulError::InvalidResponse(_) => Error::InvalidResponse(err.to_string()),
            _ => Error::Connectivity(err.to_string()),
        }
    }
}
