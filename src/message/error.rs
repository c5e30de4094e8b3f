//! Error types for message construction and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while building or validating an outbound message.
///
/// All variants are caller errors: they surface before any network
/// activity and are fixed by correcting the input, never by retrying.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The address is not a syntactically valid email address.
    #[error("The email address \"{0}\" is not valid. Expected a format like \"name@domain.com\"")]
    InvalidAddress(String),

    /// Attachment content exceeds the provider limit.
    #[error(
        "Attachment \"{filename}\" is {size} bytes, which exceeds the maximum allowed size of {max} bytes (15 MiB)"
    )]
    AttachmentTooLarge {
        /// Display name of the attachment
        filename: String,
        /// Actual content size in bytes
        size: usize,
        /// Maximum allowed size in bytes
        max: usize,
    },

    /// Attachment file could not be read.
    #[error("Failed to read attachment '{}': {source}", path.display())]
    AttachmentRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Attachment content in a serialized envelope is not valid base64.
    #[error("Attachment \"{filename}\" has invalid base64 content: {source}")]
    AttachmentEncoding {
        /// Display name of the attachment
        filename: String,
        /// Underlying decode error
        #[source]
        source: base64::DecodeError,
    },

    /// Priority outside the accepted range.
    #[error("Email priority must be between 1 (highest) and 5 (lowest), got {0}")]
    InvalidPriority(u8),

    /// No sender was set.
    #[error("The \"from\" address is required")]
    MissingFrom,

    /// No primary recipient was added.
    #[error("At least one \"to\" recipient is required")]
    MissingRecipient,

    /// Subject is unset or blank.
    #[error("The subject is required and must not be blank")]
    MissingSubject,

    /// Neither an HTML nor a text body was set.
    #[error("Either an HTML body or a text body is required")]
    MissingBody,
}
