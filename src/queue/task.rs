//! Queue envelope.

use serde::{Deserialize, Serialize};

use crate::message::EmailMessage;

/// A message plus queue metadata, handed to the task queue.
///
/// Immutable: [`with_retry`](Self::with_retry) returns a new envelope.
/// `retry_count` is carried for queue backends that want it; the handler
/// only logs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendTask {
    message: EmailMessage,
    #[serde(default)]
    retry_count: u32,
}

impl SendTask {
    /// Wraps a message with a retry count of 0.
    #[must_use]
    pub const fn new(message: EmailMessage) -> Self {
        Self {
            message,
            retry_count: 0,
        }
    }

    /// Returns a copy with `retry_count + 1`.
    #[must_use]
    pub fn with_retry(&self) -> Self {
        Self {
            message: self.message.clone(),
            retry_count: self.retry_count.saturating_add(1),
        }
    }

    /// Returns the wrapped message.
    #[must_use]
    pub const fn message(&self) -> &EmailMessage {
        &self.message
    }

    /// Returns how many times this envelope has been re-issued.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Unwraps the message.
    #[must_use]
    pub fn into_message(self) -> EmailMessage {
        self.message
    }
}
