//! Message model for outbound email.
//!
//! This module provides:
//! - Validated addresses ([`EmailAddress`])
//! - Size-checked attachments ([`Attachment`])
//! - The fluent message builder ([`EmailMessage`])
//! - Provider wire shapes ([`MessagePayload`], [`BatchPayload`])

mod address;
mod attachment;
mod email;
mod error;
mod payload;

#[cfg(test)]
mod address_tests;

pub use address::EmailAddress;
pub use attachment::{Attachment, MAX_ATTACHMENT_SIZE};
pub use email::{EmailMessage, Priority};
pub use error::ValidationError;
pub use payload::{AddressPayload, AttachmentPayload, BatchPayload, MessagePayload};
