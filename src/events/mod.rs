//! Notifications published by the sender, queue handler and webhook receiver.
//!
//! The core never knows who consumes these. It publishes to an
//! [`EventSink`] supplied by the application: [`TracingSink`] just logs,
//! [`ChannelSink`] forwards to a tokio channel for in-process listeners.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::message::EmailMessage;
use crate::transport::{ApiError, SendResponse};
use crate::webhook::WebhookEvent;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Event name for a message accepted by the provider.
pub const EMAIL_SENT: &str = "mailjet.email_sent";

/// Event name for a message the provider rejected.
pub const EMAIL_FAILED: &str = "mailjet.email_failed";

/// Event name for an inbound delivery-lifecycle callback.
pub const WEBHOOK_RECEIVED: &str = "mailjet.webhook";

/// Snapshot of an [`ApiError`] carried by [`MailEvent::Failed`].
///
/// The original error is returned to the caller; listeners get this copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    /// Human-readable error message
    pub message: String,
    /// HTTP status code, 0 for network failures
    pub status_code: u16,
    /// Decoded provider response body
    pub response_body: serde_json::Value,
}

impl ApiFailure {
    /// Returns true if the failure was caused by rate limiting.
    #[must_use]
    pub const fn was_rate_limited(&self) -> bool {
        self.status_code == ApiError::RATE_LIMITED
    }

    /// Returns true if the failure was caused by bad credentials.
    #[must_use]
    pub const fn was_authentication_error(&self) -> bool {
        self.status_code == ApiError::UNAUTHORIZED
    }
}

impl From<&ApiError> for ApiFailure {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.to_string(),
            status_code: error.status_code(),
            response_body: error.response_body().clone(),
        }
    }
}

/// A notification published to an [`EventSink`].
#[derive(Debug, Clone)]
pub enum MailEvent {
    /// The provider accepted a queued message.
    Sent {
        /// The message that was sent
        message: Box<EmailMessage>,
        /// The provider's decoded response
        response: SendResponse,
    },

    /// The provider rejected a queued message.
    Failed {
        /// The message that failed
        message: Box<EmailMessage>,
        /// What went wrong
        failure: ApiFailure,
    },

    /// A delivery-lifecycle event arrived through the webhook.
    Webhook(WebhookEvent),
}

impl MailEvent {
    /// Returns the stable event name used by listeners to route events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sent { .. } => EMAIL_SENT,
            Self::Failed { .. } => EMAIL_FAILED,
            Self::Webhook(_) => WEBHOOK_RECEIVED,
        }
    }

    /// Returns the provider message IDs for a [`MailEvent::Sent`] event.
    #[must_use]
    pub fn message_ids(&self) -> Vec<u64> {
        match self {
            Self::Sent { response, .. } => response.message_ids(),
            _ => Vec::new(),
        }
    }
}

/// Destination for [`MailEvent`]s.
///
/// Dispatch is fire-and-forget: a sink must not block and cannot fail
/// the operation that produced the event.
pub trait EventSink: Send + Sync {
    /// Publishes one event.
    fn dispatch(&self, event: MailEvent);
}

impl<S: EventSink> EventSink for Arc<S> {
    fn dispatch(&self, event: MailEvent) {
        (**self).dispatch(event);
    }
}

/// Sink that writes every event to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn dispatch(&self, event: MailEvent) {
        match &event {
            MailEvent::Sent { message, response } => tracing::info!(
                event = event.name(),
                subject = message.subject().unwrap_or_default(),
                message_ids = ?response.message_ids(),
                "Email sent"
            ),
            MailEvent::Failed { message, failure } => tracing::warn!(
                event = event.name(),
                subject = message.subject().unwrap_or_default(),
                status_code = failure.status_code,
                "Email failed: {}",
                failure.message
            ),
            MailEvent::Webhook(webhook) => tracing::info!(
                event = event.name(),
                kind = %webhook.kind,
                email = webhook.email.as_deref().unwrap_or("unknown"),
                time = ?webhook.time,
                "Webhook event received"
            ),
        }
    }
}

/// Sink that forwards events to an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<MailEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver that listeners read from.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MailEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn dispatch(&self, event: MailEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("Dropping {} event: no listener", e.0.name());
        }
    }
}
