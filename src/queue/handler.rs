//! Per-task handler invoked by the queue worker.

use crate::events::{ApiFailure, EventSink, MailEvent};
use crate::transport::{EmailProvider, SendError, SendResponse};

use super::SendTask;

/// Sends one dequeued [`SendTask`] and reports the outcome.
///
/// On success a [`MailEvent::Sent`] is dispatched. On a provider API error
/// a [`MailEvent::Failed`] is dispatched and the error is returned so the
/// queue's own retry policy can act. This handler never retries.
#[derive(Debug)]
pub struct SendTaskHandler<P, E> {
    provider: P,
    events: E,
}

impl<P: EmailProvider, E: EventSink> SendTaskHandler<P, E> {
    /// Creates a handler.
    #[must_use]
    pub const fn new(provider: P, events: E) -> Self {
        Self { provider, events }
    }

    /// Handles one task.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`SendError`] unchanged.
    pub async fn handle(&self, task: SendTask) -> Result<SendResponse, SendError> {
        let retry_count = task.retry_count();
        let message = task.into_message();
        let subject = message.subject().unwrap_or("(no subject)").to_string();

        tracing::info!(
            subject = %subject,
            recipient_count = message.to().len(),
            retry_count,
            "Processing queued email"
        );

        match self.provider.send(&message).await {
            Ok(response) => {
                tracing::info!(subject = %subject, "Queued email sent successfully");
                self.events.dispatch(MailEvent::Sent {
                    message: Box::new(message),
                    response: response.clone(),
                });
                Ok(response)
            }
            Err(e) => {
                tracing::error!(subject = %subject, retry_count, "Failed to send queued email: {e}");
                if let Some(api) = e.as_api_error() {
                    self.events.dispatch(MailEvent::Failed {
                        message: Box::new(message),
                        failure: ApiFailure::from(api),
                    });
                }
                Err(e)
            }
        }
    }
}
