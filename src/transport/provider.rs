//! Provider abstraction used by the sender and queue handler.

use std::sync::Arc;

use crate::message::EmailMessage;

use super::{SendError, SendResponse};

/// Trait for submitting messages to a transactional-email provider.
///
/// [`MailjetClient`](super::MailjetClient) is the production
/// implementation; tests substitute a double with canned responses.
pub trait EmailProvider: Send + Sync {
    /// Sends a single message.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] if the message is invalid or the call fails.
    fn send(
        &self,
        message: &EmailMessage,
    ) -> impl std::future::Future<Output = Result<SendResponse, SendError>> + Send;

    /// Sends several independent messages in one call.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] if the batch is empty or too large, any
    /// message is invalid, or the call fails.
    fn send_batch(
        &self,
        messages: &[EmailMessage],
    ) -> impl std::future::Future<Output = Result<SendResponse, SendError>> + Send;
}

impl<P: EmailProvider> EmailProvider for Arc<P> {
    async fn send(&self, message: &EmailMessage) -> Result<SendResponse, SendError> {
        (**self).send(message).await
    }

    async fn send_batch(&self, messages: &[EmailMessage]) -> Result<SendResponse, SendError> {
        (**self).send_batch(messages).await
    }
}
