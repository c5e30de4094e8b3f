//! Transport layer for the provider's batch send API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The Mailjet send client ([`MailjetClient`]) behind [`EmailProvider`]
//! - Outcome classification ([`ApiError`], [`SendError`], [`SendResponse`])
//!
//! One call is one attempt: nothing in this layer retries. Callers and
//! queue workers decide what to do with a failure based on
//! [`ApiError::is_rate_limited`] and [`ApiError::is_authentication_error`].

mod client;
mod error;
mod http;
mod mailjet;
mod provider;
mod response;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;
#[cfg(test)]
mod response_tests;

pub use client::ReqwestClient;
pub use error::{ApiError, CredentialsError, HttpError, SendError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use mailjet::{DEFAULT_API_URL, MAX_BATCH_SIZE, MailjetClient, REQUEST_TIMEOUT};
pub use provider::EmailProvider;
pub use response::{PartialFailure, SendResponse};
