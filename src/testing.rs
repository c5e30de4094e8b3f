//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::events::{EventSink, MailEvent};
use crate::message::{EmailAddress, EmailMessage};
use crate::transport::{
    EmailProvider, HttpClient, HttpError, HttpRequest, HttpResponse, SendError, SendResponse,
};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockHttpClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        let status = http::StatusCode::from_u16(status).unwrap();
        Self::new(vec![Ok(HttpResponse::json(status, body))])
    }

    pub fn raw(status: u16, body: &[u8]) -> Self {
        let status = http::StatusCode::from_u16(status).unwrap();
        Self::new(vec![Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            body.to_vec(),
        ))])
    }

    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Decodes the body of the last captured request.
    pub fn last_body(&self) -> serde_json::Value {
        let requests = self.requests.lock().unwrap();
        let body = requests.last().unwrap().body.as_ref().unwrap();
        serde_json::from_slice(body).unwrap()
    }
}

impl HttpClient for MockHttpClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockHttpClient ran out of responses")
    }
}

/// Provider double recording every message it was asked to send.
#[derive(Debug, Default)]
pub struct MockProvider {
    results: Mutex<VecDeque<Result<SendResponse, SendError>>>,
    sent: Mutex<Vec<EmailMessage>>,
}

impl MockProvider {
    pub fn new(results: Vec<Result<SendResponse, SendError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(vec![Ok(success_response())])
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    fn next(&self) -> Result<SendResponse, SendError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(success_response()))
    }
}

impl EmailProvider for MockProvider {
    async fn send(&self, message: &EmailMessage) -> Result<SendResponse, SendError> {
        message.validate()?;
        self.sent.lock().unwrap().push(message.clone());
        self.next()
    }

    async fn send_batch(&self, messages: &[EmailMessage]) -> Result<SendResponse, SendError> {
        self.sent.lock().unwrap().extend_from_slice(messages);
        self.next()
    }
}

/// Sink that keeps every dispatched event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MailEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<MailEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(MailEvent::name).collect()
    }
}

impl EventSink for RecordingSink {
    fn dispatch(&self, event: MailEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A provider body reporting one delivered recipient.
pub fn success_body() -> serde_json::Value {
    serde_json::json!({
        "Messages": [{
            "Status": "success",
            "To": [{
                "Email": "recipient@example.com",
                "MessageUUID": "123e4567-e89b-12d3-a456-426614174000",
                "MessageID": 456,
                "MessageHref": "https://api.mailjet.com/v3/message/456"
            }]
        }]
    })
}

pub fn success_response() -> SendResponse {
    SendResponse::new(success_body())
}

/// A message that passes validation.
pub fn valid_message() -> EmailMessage {
    EmailMessage::create()
        .with_from(EmailAddress::with_name("sender@example.com", "Sender").unwrap())
        .add_to(EmailAddress::new("recipient@example.com").unwrap())
        .with_subject("Test Subject")
        .with_html_body("<p>Hello</p>")
}
