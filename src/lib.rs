//! Mailjet Relay: transactional email over the Mailjet send API.
//!
//! A library for building validated email messages, submitting them to
//! the provider's batch send endpoint (directly or through a task queue),
//! and receiving signed delivery-event webhooks.

pub mod config;
pub mod events;
pub mod message;
pub mod queue;
pub mod sender;
pub mod transport;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;
