//! Error types for HTTP and provider API operations.

use thiserror::Error;

use crate::message::ValidationError;
use crate::queue::QueueError;

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A failed call to the provider API.
///
/// `status_code` is 0 when no HTTP response was received at all; the
/// network error is then available through [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status_code: u16,
    response_body: serde_json::Value,
    #[source]
    source: Option<HttpError>,
}

impl ApiError {
    /// Status code returned by the provider for rate limiting.
    pub const RATE_LIMITED: u16 = 429;

    /// Status code returned by the provider for bad credentials.
    pub const UNAUTHORIZED: u16 = 401;

    /// Creates an error for a non-success HTTP response.
    #[must_use]
    pub fn from_response(
        message: impl Into<String>,
        status_code: u16,
        response_body: serde_json::Value,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            response_body,
            source: None,
        }
    }

    /// Creates an error for a request that never produced a response.
    #[must_use]
    pub fn network(source: HttpError) -> Self {
        Self {
            message: format!("Network error while connecting to Mailjet API: {source}"),
            status_code: 0,
            response_body: serde_json::Value::Null,
            source: Some(source),
        }
    }

    /// Returns the HTTP status code, or 0 for network failures.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the decoded response body (`Null` if there was none).
    #[must_use]
    pub const fn response_body(&self) -> &serde_json::Value {
        &self.response_body
    }

    /// Returns true if the provider rejected the call for rate limiting.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.status_code == Self::RATE_LIMITED
    }

    /// Returns true if the provider rejected the credentials.
    #[must_use]
    pub const fn is_authentication_error(&self) -> bool {
        self.status_code == Self::UNAUTHORIZED
    }
}

/// Error returned by send operations.
#[derive(Debug, Error)]
pub enum SendError {
    /// A message failed validation; nothing was sent.
    #[error("Invalid message: {0}")]
    Validation(#[from] ValidationError),

    /// `send_batch` was called with no messages.
    #[error("Cannot send an empty batch. Provide at least one message")]
    EmptyBatch,

    /// `send_batch` was called with more messages than the API accepts.
    #[error("Batch size of {size} exceeds the maximum allowed by Mailjet ({max})")]
    BatchTooLarge {
        /// Number of messages supplied
        size: usize,
        /// Maximum accepted per call
        max: usize,
    },

    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The provider call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The message could not be handed to the task queue.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl SendError {
    /// Returns the underlying API error, if this is one.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Error raised when constructing a client with unusable credentials.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    /// The API key is empty.
    #[error("Mailjet API key cannot be empty")]
    EmptyApiKey,

    /// The secret key is empty.
    #[error("Mailjet secret key cannot be empty")]
    EmptySecretKey,
}
