//! Inbound webhook authentication, parsing and dispatch.

use http::{HeaderMap, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use crate::events::{EventSink, MailEvent};

use super::event::{WebhookEvent, payload_items};
use super::signature::{SIGNATURE_HEADER, SignatureVerifier};

/// Result of handling one webhook request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Request authenticated; this many events were dispatched.
    Processed(usize),
    /// Signature missing or wrong.
    Unauthorized,
    /// Authenticated but the body was empty.
    EmptyBody,
    /// Authenticated but the body was not JSON.
    InvalidJson,
}

impl WebhookOutcome {
    /// HTTP status to answer with.
    ///
    /// Anything past authentication that parsed is a 200, even if some
    /// items were skipped: a non-200 makes the provider redeliver the
    /// whole batch.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Processed(_) => StatusCode::OK,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EmptyBody | Self::InvalidJson => StatusCode::BAD_REQUEST,
        }
    }

    /// JSON body to answer with.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Processed(count) => json!({ "processed": count }),
            Self::Unauthorized => json!({ "error": "Invalid webhook signature" }),
            Self::EmptyBody => json!({ "error": "Empty request body" }),
            Self::InvalidJson => json!({ "error": "Invalid JSON" }),
        }
    }
}

/// Receives delivery-event callbacks from the provider.
///
/// With no secret configured every request is accepted and a warning is
/// logged each time. With a secret, the `X-Mailjet-Signature` header must
/// carry the hex HMAC-SHA256 of the exact raw body.
#[derive(Debug)]
pub struct WebhookReceiver<E> {
    verifier: Option<SignatureVerifier>,
    sink: E,
}

impl<E: EventSink> WebhookReceiver<E> {
    /// Creates a receiver. An empty or absent secret disables verification.
    #[must_use]
    pub fn new(sink: E, secret: Option<SecretString>) -> Self {
        let verifier = secret
            .filter(|s| !s.expose_secret().is_empty())
            .map(SignatureVerifier::new);

        Self { verifier, sink }
    }

    /// Returns true if requests must be signed.
    #[must_use]
    pub const fn is_secured(&self) -> bool {
        self.verifier.is_some()
    }

    /// Handles one request given its headers and raw body.
    pub fn handle(&self, headers: &HeaderMap, body: &[u8]) -> WebhookOutcome {
        if !self.authenticate(headers, body) {
            tracing::warn!("Webhook received with invalid signature, possible spoofing attempt");
            return WebhookOutcome::Unauthorized;
        }

        if body.is_empty() {
            return WebhookOutcome::EmptyBody;
        }

        let payload: Value = match serde_json::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Webhook: failed to parse JSON body: {e}");
                return WebhookOutcome::InvalidJson;
            }
        };

        let mut processed = 0;
        for item in payload_items(payload) {
            let Some(event) = WebhookEvent::from_value(&item) else {
                tracing::debug!("Webhook: skipping item without an event field");
                continue;
            };

            tracing::debug!(
                kind = %event.kind,
                email = event.email.as_deref().unwrap_or("unknown"),
                time = ?event.time,
                "Webhook event"
            );
            self.sink.dispatch(MailEvent::Webhook(event));
            processed += 1;
        }

        tracing::info!(event_count = processed, "Webhook processed");
        WebhookOutcome::Processed(processed)
    }

    fn authenticate(&self, headers: &HeaderMap, body: &[u8]) -> bool {
        let Some(verifier) = &self.verifier else {
            tracing::warn!(
                "Webhook secret is not configured; accepting unsigned request. \
                 Set MAILJET_WEBHOOK_SECRET in production"
            );
            return true;
        };

        if body.is_empty() {
            return false;
        }

        headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|signature| verifier.verify(signature, body))
    }
}
