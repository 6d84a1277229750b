//! Unified error types for techlens.
//!
//! Display strings carry a stable upper-case code so log lines and JSON
//! bodies can be grepped regardless of which crate raised the error.

use crate::config::ConfigError;

/// Unified error types for the techlens services.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required configuration value is missing or invalid.
    #[error("CONFIGURATION_ERROR: {0}")]
    Configuration(String),

    /// The expected content type is not provisioned in the content space yet.
    #[error("SCHEMA_ABSENT: {0}")]
    SchemaAbsent(String),

    /// The remote call failed (network, auth, timeout, HTTP status).
    #[error("CONNECTIVITY_ERROR: {0}")]
    Connectivity(String),

    /// The remote source answered with a body we could not use.
    #[error("INVALID_RESPONSE: {0}")]
    InvalidResponse(String),

    /// The query succeeded but returned no entries.
    #[error("EMPTY_RESPONSE: {0}")]
    Empty(String),

    /// Malformed caller input.
    #[error("VALIDATION_ERROR: {0}")]
    Validation(String),

    /// The mail provider rejected the configured credentials.
    #[error("MAILER_AUTH_FAILED: {0}")]
    MailerAuth(String),

    /// The mail provider failed to accept the message.
    #[error("MAILER_SEND_FAILED: {0}")]
    MailerSend(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::SchemaAbsent(_) => "SCHEMA_ABSENT",
            Error::Connectivity(_) => "CONNECTIVITY_ERROR",
            Error::InvalidResponse(_) => "INVALID_RESPONSE",
            Error::Empty(_) => "EMPTY_RESPONSE",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::MailerAuth(_) => "MAILER_AUTH_FAILED",
            Error::MailerSend(_) => "MAILER_SEND_FAILED",
        }
    }

    /// HTTP status code used when this error reaches a response.
    pub fn status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::SchemaAbsent(_) | Error::Empty(_) => 404,
            Error::Connectivity(_) | Error::InvalidResponse(_) => 502,
            Error::Configuration(_) | Error::MailerAuth(_) | Error::MailerSend(_) => 500,
        }
    }

    /// Whether the error is an expected condition rather than a fault.
    ///
    /// Schema absence and empty results happen on a freshly provisioned
    /// space and are logged at a lower level than connectivity failures.
    pub fn is_expected(&self) -> bool {
        matches!(self, Error::SchemaAbsent(_) | Error::Empty(_))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
