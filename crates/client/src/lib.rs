//! Client code for techlens.
//!
//! This crate provides the Contentful Delivery API client, the content
//! accessors pages read through, and the contact form mailer.

pub mod content;
pub mod contentful;
pub mod mailer;

pub use content::{ContentService, ContentSource, EntryPage};
pub use contentful::{ContentfulClient, ContentfulConfig, ContentfulError, EntryQuery};
pub use mailer::{ContactRequest, MailTransport, Mailer, MailerError, OutgoingMail, SmtpMailTransport};
