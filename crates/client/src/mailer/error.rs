//! Contact mailer error types.

/// Errors from validating or relaying a contact submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// Mail account or app password not configured.
    #[error("missing credentials: {0} not set")]
    MissingCredentials(&'static str),

    /// A required form field is empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A single-line field contains line breaks or other control characters.
    #[error("invalid characters in {0}: control characters are not allowed")]
    ControlCharacters(&'static str),

    /// Email address does not look like `local@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,

    /// A form field exceeds its length cap.
    #[error("field too long: {field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Message could not be assembled (bad address, header).
    #[error("message build failed: {0}")]
    Build(String),

    /// SMTP server rejected the credentials.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// SMTP server or connection failed.
    #[error("send failed: {0}")]
    SendFailed(String),
}

impl MailerError {
    /// Message safe to show the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            MailerError::MissingCredentials(_) => {
                "Email service is not configured. Please try again later or reach out directly.".to_string()
            }
            MailerError::MissingField(field) => format!("Please provide your {field}."),
            MailerError::ControlCharacters(field) => format!("Your {field} must be a single line of text."),
            MailerError::InvalidEmail => "Please provide a valid email address.".to_string(),
            MailerError::TooLong { field, max } => format!("Your {field} must be at most {max} characters."),
            MailerError::AuthFailed(_) => {
                "Email service authentication failed. The site owner has been notified.".to_string()
            }
            MailerError::Build(_) | MailerError::SendFailed(_) => {
                "Failed to send your message. Please try again later.".to_string()
            }
        }
    }
}

impl From<MailerError> for techlens_core::Error {
    fn from(err: MailerError) -> Self {
        use techlens_core::Error;

        match err {
            MailerError::MissingCredentials(_) => Error::Configuration(err.to_string()),
            MailerError::MissingField(_)
            | MailerError::ControlCharacters(_)
            | MailerError::InvalidEmail
            | MailerError::TooLong { .. } => {
                Error::Validation(err.to_string())
            }
            MailerError::AuthFailed(_) => Error::MailerAuth(err.to_string()),
            MailerError::Build(_) | MailerError::SendFailed(_) => Error::MailerSend(err.to_string()),
        }
    }
}
