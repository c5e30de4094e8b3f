//! Outbound message builder.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::payload::{AddressPayload, AttachmentPayload, MessagePayload};
use super::{Attachment, EmailAddress, ValidationError};

/// Message priority, 1 (highest) to 5 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Highest accepted priority.
    pub const HIGHEST: u8 = 1;

    /// Lowest accepted priority.
    pub const LOWEST: u8 = 5;

    /// Default for transactional mail.
    pub const DEFAULT: Self = Self(2);

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::HIGHEST..=Self::LOWEST).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidPriority(value))
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// A single outbound email, assembled with chained `with_*`/`add_*` calls.
///
/// Required fields are checked lazily by [`validate`](Self::validate),
/// which [`to_payload`](Self::to_payload) always runs first. Priority is
/// the one exception and is checked as soon as it is set.
///
/// # Example
///
/// ```
/// use mailjet_relay::message::{EmailAddress, EmailMessage};
///
/// # fn main() -> Result<(), mailjet_relay::message::ValidationError> {
/// let message = EmailMessage::create()
///     .with_from(EmailAddress::with_name("noreply@example.com", "Example")?)
///     .add_to(EmailAddress::new("user@example.com")?)
///     .with_subject("Welcome!")
///     .with_html_body("<h1>Hello</h1>")
///     .with_priority(1)?;
///
/// message.validate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    from: Option<EmailAddress>,
    reply_to: Option<EmailAddress>,
    #[serde(default)]
    to: Vec<EmailAddress>,
    #[serde(default)]
    cc: Vec<EmailAddress>,
    #[serde(default)]
    bcc: Vec<EmailAddress>,
    subject: Option<String>,
    html_body: Option<String>,
    text_body: Option<String>,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    variables: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    priority: Priority,
}

impl EmailMessage {
    /// Starts an empty message.
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// Sets the sender.
    #[must_use]
    pub fn with_from(mut self, from: EmailAddress) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the address replies should go to.
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: EmailAddress) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Appends a primary recipient. Duplicates are kept.
    #[must_use]
    pub fn add_to(mut self, to: EmailAddress) -> Self {
        self.to.push(to);
        self
    }

    /// Appends a carbon-copy recipient.
    #[must_use]
    pub fn add_cc(mut self, cc: EmailAddress) -> Self {
        self.cc.push(cc);
        self
    }

    /// Appends a blind carbon-copy recipient.
    #[must_use]
    pub fn add_bcc(mut self, bcc: EmailAddress) -> Self {
        self.bcc.push(bcc);
        self
    }

    /// Sets the subject line.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the HTML body.
    #[must_use]
    pub fn with_html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    /// Sets the plain-text body.
    #[must_use]
    pub fn with_text_body(mut self, text: impl Into<String>) -> Self {
        self.text_body = Some(text.into());
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Reads a file from disk and appends it as an attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is too large.
    pub fn with_attachment_file(
        self,
        path: &Path,
        display_name: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let attachment = Attachment::from_path(path, display_name)?;
        Ok(self.with_attachment(attachment))
    }

    /// Sets a custom tracking variable. A repeated key overwrites.
    #[must_use]
    pub fn with_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Sets a custom email header. A repeated name overwrites.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the priority.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPriority`] immediately if
    /// `priority` is outside `1..=5`.
    pub fn with_priority(mut self, priority: u8) -> Result<Self, ValidationError> {
        self.priority = Priority::try_from(priority)?;
        Ok(self)
    }

    /// Sets the sender only if none has been set yet.
    #[must_use]
    pub fn with_default_from(mut self, from: &EmailAddress) -> Self {
        if self.from.is_none() {
            self.from = Some(from.clone());
        }
        self
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in this order: missing sender,
    /// no primary recipient, blank subject, no body.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.is_none() {
            return Err(ValidationError::MissingFrom);
        }

        if self.to.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }

        if self.subject.as_deref().is_none_or(|s| s.trim().is_empty()) {
            return Err(ValidationError::MissingSubject);
        }

        if self.html_body.is_none() && self.text_body.is_none() {
            return Err(ValidationError::MissingBody);
        }

        Ok(())
    }

    /// Validates and converts the message into its provider wire shape.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`validate`](Self::validate).
    pub fn to_payload(&self) -> Result<MessagePayload<'_>, ValidationError> {
        self.validate()?;

        let (Some(from), Some(subject)) = (&self.from, &self.subject) else {
            return Err(ValidationError::MissingFrom);
        };

        Ok(MessagePayload {
            from: from.into(),
            to: self.to.iter().map(AddressPayload::from).collect(),
            subject,
            priority: self.priority.get(),
            reply_to: self.reply_to.as_ref().map(AddressPayload::from),
            cc: self.cc.iter().map(AddressPayload::from).collect(),
            bcc: self.bcc.iter().map(AddressPayload::from).collect(),
            html_part: self.html_body.as_deref(),
            text_part: self.text_body.as_deref(),
            attachments: self.attachments.iter().map(AttachmentPayload::from).collect(),
            variables: Some(&self.variables).filter(|v| !v.is_empty()),
            headers: Some(&self.headers).filter(|h| !h.is_empty()),
        })
    }

    /// Returns the sender.
    #[must_use]
    pub const fn from(&self) -> Option<&EmailAddress> {
        self.from.as_ref()
    }

    /// Returns the reply-to address.
    #[must_use]
    pub const fn reply_to(&self) -> Option<&EmailAddress> {
        self.reply_to.as_ref()
    }

    /// Returns the primary recipients in insertion order.
    #[must_use]
    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    /// Returns the carbon-copy recipients.
    #[must_use]
    pub fn cc(&self) -> &[EmailAddress] {
        &self.cc
    }

    /// Returns the blind carbon-copy recipients.
    #[must_use]
    pub fn bcc(&self) -> &[EmailAddress] {
        &self.bcc
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the HTML body.
    #[must_use]
    pub fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    /// Returns the plain-text body.
    #[must_use]
    pub fn text_body(&self) -> Option<&str> {
        self.text_body.as_deref()
    }

    /// Returns the attachments in insertion order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the custom variables.
    #[must_use]
    pub const fn variables(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.variables
    }

    /// Returns the custom headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}
