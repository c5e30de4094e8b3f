//! Mailjet v3.1 batch send client.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use secrecy::SecretString;
use serde_json::Value;

use crate::message::{BatchPayload, EmailMessage, MessagePayload};

use super::{
    ApiError, CredentialsError, EmailProvider, HttpClient, HttpRequest, SendError, SendResponse,
};

/// Production send endpoint.
pub const DEFAULT_API_URL: &str = "https://api.mailjet.com/v3.1/send";

/// Maximum number of messages accepted in one batch call.
pub const MAX_BATCH_SIZE: usize = 50;

/// Upper bound for one send call, connect to last byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("mailjet-relay/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Client for the Mailjet batch send API.
///
/// Holds only immutable configuration, so one instance can be shared
/// across tasks (wrap it in an `Arc`) without locking.
///
/// # Example
///
/// ```
/// use mailjet_relay::transport::{MailjetClient, ReqwestClient};
///
/// let client = MailjetClient::new(ReqwestClient::new(), "api-key", "secret-key")
///     .unwrap()
///     .with_sandbox_mode(true);
/// assert!(client.sandbox_mode());
///
/// assert!(MailjetClient::new(ReqwestClient::new(), "", "secret-key").is_err());
/// ```
pub struct MailjetClient<H> {
    http: H,
    api_key: String,
    secret_key: SecretString,
    authorization: HeaderValue,
    endpoint: url::Url,
    sandbox_mode: bool,
}

impl<H> fmt::Debug for MailjetClient<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailjetClient")
            .field("api_key", &self.api_key)
            .field("secret_key", &self.secret_key)
            .field("endpoint", &self.endpoint.as_str())
            .field("sandbox_mode", &self.sandbox_mode)
            .finish_non_exhaustive()
    }
}

impl<H> MailjetClient<H> {
    /// Creates a client for the production endpoint with sandbox mode off.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] if either key is empty.
    pub fn new(
        http: H,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() {
            return Err(CredentialsError::EmptyApiKey);
        }
        if secret_key.is_empty() {
            return Err(CredentialsError::EmptySecretKey);
        }

        let token = STANDARD.encode(format!("{api_key}:{secret_key}"));
        let mut authorization = HeaderValue::from_str(&format!("Basic {token}"))
            .expect("base64 output is a valid header value");
        authorization.set_sensitive(true);

        Ok(Self {
            http,
            api_key,
            secret_key: SecretString::new(secret_key),
            authorization,
            endpoint: url::Url::parse(DEFAULT_API_URL).expect("default endpoint is a valid URL"),
            sandbox_mode: false,
        })
    }

    /// Sets sandbox mode: the provider validates requests without delivering.
    #[must_use]
    pub const fn with_sandbox_mode(mut self, sandbox_mode: bool) -> Self {
        self.sandbox_mode = sandbox_mode;
        self
    }

    /// Overrides the send endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: url::Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Returns the public API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Returns true if sandbox mode is enabled.
    #[must_use]
    pub const fn sandbox_mode(&self) -> bool {
        self.sandbox_mode
    }
}

impl<H: HttpClient> MailjetClient<H> {
    /// Builds the authenticated POST for a batch body.
    fn build_request(&self, body: Vec<u8>) -> HttpRequest {
        HttpRequest::post(self.endpoint.clone())
            .with_header(AUTHORIZATION, self.authorization.clone())
            .with_header(CONTENT_TYPE, HeaderValue::from_static(JSON))
            .with_header(ACCEPT, HeaderValue::from_static(JSON))
            .with_header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .with_body(body)
            .with_timeout(REQUEST_TIMEOUT)
    }

    /// Submits already-validated payloads as one batch and classifies the outcome.
    async fn submit(&self, messages: Vec<MessagePayload<'_>>) -> Result<SendResponse, SendError> {
        let message_count = messages.len();
        let body = serde_json::to_vec(&BatchPayload {
            messages,
            sandbox_mode: self.sandbox_mode,
        })?;

        tracing::info!(
            message_count,
            sandbox_mode = self.sandbox_mode,
            "Sending email via Mailjet API"
        );

        let response = self
            .http
            .request(self.build_request(body))
            .await
            .map_err(|e| {
                tracing::error!("Mailjet API unreachable: {e}");
                ApiError::network(e)
            })?;

        let status = response.status.as_u16();
        let decoded = serde_json::from_slice::<Value>(&response.body).ok();

        if response.status != http::StatusCode::OK {
            let body = decoded.unwrap_or(Value::Null);
            let reason = error_reason(&body);
            tracing::error!(status_code = status, error_message = reason, "Mailjet API returned an error");

            return Err(ApiError::from_response(
                format!("Mailjet API error (HTTP {status}): {reason}"),
                status,
                body,
            )
            .into());
        }

        let Some(body) = decoded else {
            tracing::error!("Mailjet API returned HTTP 200 with an undecodable body");
            return Err(ApiError::from_response(
                "Mailjet API returned HTTP 200 with an invalid JSON body",
                status,
                Value::Null,
            )
            .into());
        };

        let response = SendResponse::new(body);
        for failure in response.partial_failures() {
            tracing::warn!(
                message_index = failure.index,
                status = %failure.status,
                errors = %failure.errors,
                "Message in batch had non-success status"
            );
        }

        tracing::info!(
            message_count,
            sandbox_mode = self.sandbox_mode,
            "Email(s) accepted by Mailjet"
        );

        Ok(response)
    }
}

/// Picks the provider's machine-readable error text, if any.
fn error_reason(body: &Value) -> &str {
    ["ErrorMessage", "ErrorInfo"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .unwrap_or("Unknown API error")
}

impl<H: HttpClient> EmailProvider for MailjetClient<H> {
    async fn send(&self, message: &EmailMessage) -> Result<SendResponse, SendError> {
        let payload = message.to_payload()?;
        self.submit(vec![payload]).await
    }

    async fn send_batch(&self, messages: &[EmailMessage]) -> Result<SendResponse, SendError> {
        if messages.is_empty() {
            return Err(SendError::EmptyBatch);
        }

        if messages.len() > MAX_BATCH_SIZE {
            return Err(SendError::BatchTooLarge {
                size: messages.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        let payloads = messages
            .iter()
            .map(EmailMessage::to_payload)
            .collect::<Result<Vec<_>, _>>()?;

        self.submit(payloads).await
    }
}
