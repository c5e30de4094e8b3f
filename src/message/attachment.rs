//! File attachments.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum attachment size accepted by the provider (15 MiB).
pub const MAX_ATTACHMENT_SIZE: usize = 15 * 1024 * 1024;

/// A file attached to a message.
///
/// Content is held as raw bytes and base64-encoded only when the message
/// is serialized. The size limit is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAttachment", into = "RawAttachment")]
pub struct Attachment {
    filename: String,
    content: Vec<u8>,
    mime_type: String,
    inline: bool,
}

/// Envelope form with base64 content.
#[derive(Serialize, Deserialize)]
struct RawAttachment {
    filename: String,
    content: String,
    mime_type: String,
    #[serde(default)]
    inline: bool,
}

impl From<Attachment> for RawAttachment {
    fn from(attachment: Attachment) -> Self {
        Self {
            content: STANDARD.encode(&attachment.content),
            filename: attachment.filename,
            mime_type: attachment.mime_type,
            inline: attachment.inline,
        }
    }
}

impl TryFrom<RawAttachment> for Attachment {
    type Error = ValidationError;

    fn try_from(raw: RawAttachment) -> Result<Self, Self::Error> {
        let content =
            STANDARD
                .decode(raw.content.as_bytes())
                .map_err(|source| ValidationError::AttachmentEncoding {
                    filename: raw.filename.clone(),
                    source,
                })?;

        Self::build(raw.filename, content, raw.mime_type, raw.inline)
    }
}

impl Attachment {
    /// Creates a regular (downloadable) attachment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AttachmentTooLarge`] if `content` exceeds
    /// [`MAX_ATTACHMENT_SIZE`].
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::build(filename.into(), content.into(), mime_type.into(), false)
    }

    /// Creates an attachment meant to be embedded in the HTML body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AttachmentTooLarge`] if `content` exceeds
    /// [`MAX_ATTACHMENT_SIZE`].
    pub fn inline(
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::build(filename.into(), content.into(), mime_type.into(), true)
    }

    /// Reads an attachment from disk.
    ///
    /// The content type is inferred from the file extension, falling back
    /// to `application/octet-stream`. The display name defaults to the file
    /// name of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AttachmentRead`] if the file cannot be
    /// read, or [`ValidationError::AttachmentTooLarge`] if it is too big.
    pub fn from_path(path: &Path, display_name: Option<&str>) -> Result<Self, ValidationError> {
        let content = std::fs::read(path).map_err(|source| ValidationError::AttachmentRead {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = display_name.map_or_else(
            || {
                path.file_name()
                    .map_or_else(|| "attachment".to_string(), |n| n.to_string_lossy().into_owned())
            },
            ToString::to_string,
        );

        let mime_type = mime_guess::from_path(path).first_or_octet_stream();

        Self::new(filename, content, mime_type.to_string())
    }

    fn build(
        filename: String,
        content: Vec<u8>,
        mime_type: String,
        inline: bool,
    ) -> Result<Self, ValidationError> {
        if content.len() > MAX_ATTACHMENT_SIZE {
            return Err(ValidationError::AttachmentTooLarge {
                filename,
                size: content.len(),
                max: MAX_ATTACHMENT_SIZE,
            });
        }

        Ok(Self {
            filename,
            content,
            mime_type,
            inline,
        })
    }

    /// Returns the display file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the raw content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns true if this attachment is embedded in the HTML body.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        self.inline
    }

    /// Returns the content as standard base64.
    #[must_use]
    pub fn base64_content(&self) -> String {
        STANDARD.encode(&self.content)
    }
}
