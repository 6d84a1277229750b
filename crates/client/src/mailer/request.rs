//! Contact form submission and its email bodies.

use super::MailerError;
use lettre::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_SUBJECT_CHARS: usize = 300;
pub const MAX_MESSAGE_CHARS: usize = 10_000;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"));

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

fn require(field: &'static str, value: &str, max: usize) -> Result<(), MailerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MailerError::MissingField(field));
    }
    if value.chars().count() > max {
        return Err(MailerError::TooLong { field, max });
    }
    Ok(())
}

/// Header-bound fields must stay on one line.
fn single_line(field: &'static str, value: &str) -> Result<(), MailerError> {
    if value.trim().chars().any(char::is_control) {
        return Err(MailerError::ControlCharacters(field));
    }
    Ok(())
}

/// Escape text for inclusion in an HTML body.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl ContactRequest {
    /// Check required fields, email shape, header safety and length caps.
    ///
    /// Runs before any transport is touched. The email must match the basic
    /// `local@domain.tld` shape and also parse as an RFC 5322 address.
    pub fn validate(&self) -> Result<(), MailerError> {
        require("name", &self.name, MAX_NAME_CHARS)?;
        require("email", &self.email, usize::MAX)?;
        require("message", &self.message, MAX_MESSAGE_CHARS)?;
        single_line("name", &self.name)?;

        let email = self.email.trim();
        if !EMAIL_REGEX.is_match(email) || email.parse::<Address>().is_err() {
            return Err(MailerError::InvalidEmail);
        }

        if let Some(subject) = &self.subject {
            if subject.trim().chars().count() > MAX_SUBJECT_CHARS {
                return Err(MailerError::TooLong { field: "subject", max: MAX_SUBJECT_CHARS });
            }
            single_line("subject", subject)?;
        }

        Ok(())
    }

    /// Submitter's subject, or a generated one naming the sender.
    pub fn subject_line(&self) -> String {
        match self.subject.as_deref().map(str::trim) {
            Some(subject) if !subject.is_empty() => subject.to_string(),
            _ => format!("New contact form submission from {}", self.name.trim()),
        }
    }

    pub fn text_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}\n",
            self.name.trim(),
            self.email.trim(),
            self.subject_line(),
            self.message.trim()
        )
    }

    pub fn html_body(&self) -> String {
        let message = escape_html(self.message.trim()).replace('\n', "<br>\n");
        format!(
            concat!(
                "<h2>New contact form submission</h2>\n",
                "<p><strong>Name:</strong> {}</p>\n",
                "<p><strong>Email:</strong> {}</p>\n",
                "<p><strong>Subject:</strong> {}</p>\n",
                "<h3>Message</h3>\n",
                "<p>{}</p>\n"
            ),
            escape_html(self.name.trim()),
            escape_html(self.email.trim()),
            escape_html(&self.subject_line()),
            message
        )
    }
}
