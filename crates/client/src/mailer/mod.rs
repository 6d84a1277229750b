//! Contact form relay over SMTP.
//!
//! Submissions are validated, composed into one email addressed to the
//! site account with the submitter as reply-to, and handed to a
//! [`MailTransport`]. Production uses [`SmtpMailTransport`] (lettre over
//! STARTTLS); tests substitute their own transport.

pub mod error;
pub mod request;

pub use error::MailerError;
pub use request::ContactRequest;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use techlens_core::AppConfig;

/// A composed email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub reply_to_name: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    /// Full `Message-ID` header value including angle brackets.
    pub message_id: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError>;
}

/// SMTP reply codes that mean the credentials were rejected.
const AUTH_REPLY_CODES: &[&str] = &["530", "534", "535"];

/// Map an SMTP failure to auth or send failure.
///
/// The reply `code` decides when the server sent one. Without a reply
/// (connection or TLS failures) only authentication wording in `detail`
/// counts as rejected credentials.
pub fn classify_smtp_error(code: Option<&str>, detail: &str) -> MailerError {
    let auth = match code {
        Some(code) => AUTH_REPLY_CODES.contains(&code),
        None => {
            let lower = detail.to_ascii_lowercase();
            lower.contains("authentication") || lower.contains("username and password")
        }
    };

    if auth { MailerError::AuthFailed(detail.to_string()) } else { MailerError::SendFailed(detail.to_string()) }
}

fn classify_transport_error(err: &lettre::transport::smtp::Error) -> MailerError {
    let code = err.status().map(|code| code.to_string());
    classify_smtp_error(code.as_deref(), &err.to_string())
}

/// Collapse line breaks and other control characters to spaces.
fn header_text(value: &str) -> String {
    value.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, MailerError> {
    let address = address.parse().map_err(|e| MailerError::Build(format!("address {address:?}: {e}")))?;
    Ok(Mailbox::new(name.map(header_text), address))
}

/// SMTP relay authenticated with the site account's app password.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(host: &str, user: &str, password: &str, timeout: Duration) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailerError::Build(format!("SMTP relay {host}: {e}")))?
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport })
    }

    fn build_message(mail: &OutgoingMail) -> Result<Message, MailerError> {
        Message::builder()
            .from(mailbox(Some("TechLens Contact Form"), &mail.from)?)
            .to(mailbox(None, &mail.to)?)
            .reply_to(mailbox(Some(&mail.reply_to_name), &mail.reply_to)?)
            .subject(header_text(&mail.subject))
            .message_id(Some(mail.message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(mail.text.clone(), mail.html.clone()))
            .map_err(|e| MailerError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError> {
        let message = Self::build_message(mail)?;
        self.transport.send(message).await.map_err(|e| classify_transport_error(&e))?;
        Ok(())
    }
}

/// Contact form sender.
pub struct Mailer {
    transport: Option<Arc<dyn MailTransport>>,
    account: Option<String>,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>, account: impl Into<String>) -> Self {
        Self { transport: Some(transport), account: Some(account.into()) }
    }

    /// A mailer that rejects every send with `MissingCredentials`.
    pub fn unconfigured() -> Self {
        Self { transport: None, account: None }
    }

    /// SMTP mailer when the account and app password are both present.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, MailerError> {
        let Ok((user, password)) = config.require_mailer() else {
            tracing::warn!("mail credentials not configured, contact form will reject submissions");
            return Ok(Self::unconfigured());
        };

        let transport = SmtpMailTransport::new(&config.smtp_host, user, password, config.timeout())?;
        Ok(Self::new(Arc::new(transport), user))
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    fn compose(account: &str, request: &ContactRequest) -> OutgoingMail {
        let domain = account.rsplit_once('@').map_or("localhost", |(_, domain)| domain);

        OutgoingMail {
            from: account.to_string(),
            to: account.to_string(),
            reply_to_name: request.name.trim().to_string(),
            reply_to: request.email.trim().to_string(),
            subject: request.subject_line(),
            text: request.text_body(),
            html: request.html_body(),
            message_id: format!("<{}@{domain}>", uuid::Uuid::new_v4()),
        }
    }

    /// Validate and relay one submission, returning its `Message-ID`.
    ///
    /// Validation runs first, so a malformed submission is rejected even
    /// when the mailer is unconfigured.
    pub async fn send_contact(&self, request: &ContactRequest) -> Result<String, MailerError> {
        request.validate()?;

        let (Some(transport), Some(account)) = (&self.transport, &self.account) else {
            return Err(MailerError::MissingCredentials("GMAIL_USER/GMAIL_APP_PASSWORD"));
        };

        let mail = Self::compose(account, request);
        transport.send(&mail).await?;

        tracing::info!(message_id = %mail.message_id, "contact submission relayed");
        Ok(mail.message_id)
    }
}
