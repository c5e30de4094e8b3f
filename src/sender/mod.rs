//! Application-facing send service.

use crate::message::{EmailAddress, EmailMessage};
use crate::queue::{SendTask, TaskQueue};
use crate::transport::{EmailProvider, SendError, SendResponse};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Sends messages directly or through a task queue.
///
/// A configured default sender fills in `from` on messages that have none.
#[derive(Debug)]
pub struct EmailSender<P, Q> {
    provider: P,
    queue: Q,
    default_from: Option<EmailAddress>,
}

impl<P, Q> EmailSender<P, Q> {
    /// Creates a sender with no default sender address.
    #[must_use]
    pub const fn new(provider: P, queue: Q) -> Self {
        Self {
            provider,
            queue,
            default_from: None,
        }
    }

    /// Sets the address used when a message has no `from`.
    #[must_use]
    pub fn with_default_from(mut self, from: EmailAddress) -> Self {
        self.default_from = Some(from);
        self
    }

    /// Returns the default sender address.
    #[must_use]
    pub const fn default_from(&self) -> Option<&EmailAddress> {
        self.default_from.as_ref()
    }

    fn prepare(&self, message: EmailMessage) -> EmailMessage {
        match &self.default_from {
            Some(from) => message.with_default_from(from),
            None => message,
        }
    }
}

impl<P: EmailProvider, Q: TaskQueue> EmailSender<P, Q> {
    /// Sends immediately, bypassing the queue.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] if the message is invalid or the provider
    /// call fails.
    pub async fn send_now(&self, message: EmailMessage) -> Result<SendResponse, SendError> {
        let message = self.prepare(message);
        self.provider.send(&message).await
    }

    /// Validates the message and publishes it to the queue.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Validation`] for an invalid message, or
    /// [`SendError::Queue`] if the queue rejects it.
    pub async fn send_async(&self, message: EmailMessage) -> Result<(), SendError> {
        let message = self.prepare(message);
        message.validate()?;

        tracing::debug!(
            subject = message.subject().unwrap_or_default(),
            recipient_count = message.to().len(),
            "Enqueueing email"
        );
        self.queue.enqueue(SendTask::new(message)).await?;
        Ok(())
    }
}
