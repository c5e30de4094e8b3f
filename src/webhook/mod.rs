//! Webhook receiver for provider delivery events.
//!
//! This module provides:
//! - Signature verification ([`SignatureVerifier`])
//! - Event normalization ([`WebhookEvent`], [`EventKind`])
//! - Request handling ([`WebhookReceiver`], [`WebhookOutcome`])
//! - An axum endpoint ([`router`], [`WebhookServer`])

mod event;
mod receiver;
mod server;
mod signature;

#[cfg(test)]
mod event_tests;
#[cfg(test)]
mod receiver_tests;

pub use event::{EventKind, WebhookEvent, payload_items};
pub use receiver::{WebhookOutcome, WebhookReceiver};
pub use server::{DEFAULT_WEBHOOK_PATH, WebhookServer, router};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier};
