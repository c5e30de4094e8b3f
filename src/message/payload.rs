//! Provider wire shapes for outbound messages.
//!
//! These borrow from a validated [`EmailMessage`](super::EmailMessage) and
//! serialize to the JSON the send API expects. Optional keys are omitted
//! when empty because the API rejects empty collections and null scalars.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Attachment, EmailAddress};

/// `{Email, Name?}`
#[derive(Debug, Serialize)]
pub struct AddressPayload<'a> {
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

impl<'a> From<&'a EmailAddress> for AddressPayload<'a> {
    fn from(address: &'a EmailAddress) -> Self {
        Self {
            email: address.address(),
            name: address.name(),
        }
    }
}

/// `{Base64Content, Filename, ContentType}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttachmentPayload<'a> {
    pub base64_content: String,
    pub filename: &'a str,
    pub content_type: &'a str,
}

impl<'a> From<&'a Attachment> for AttachmentPayload<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            base64_content: attachment.base64_content(),
            filename: attachment.filename(),
            content_type: attachment.mime_type(),
        }
    }
}

/// One entry of the batch `Messages` array.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessagePayload<'a> {
    pub from: AddressPayload<'a>,
    pub to: Vec<AddressPayload<'a>>,
    pub subject: &'a str,
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<AddressPayload<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<AddressPayload<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<AddressPayload<'a>>,
    #[serde(rename = "HTMLPart", skip_serializing_if = "Option::is_none")]
    pub html_part: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_part: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<&'a BTreeMap<String, String>>,
}

/// Request body for the batch send endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchPayload<'a> {
    pub messages: Vec<MessagePayload<'a>>,
    pub sandbox_mode: bool,
}
