//! Normalized delivery-lifecycle events.

use std::fmt;

use serde_json::{Map, Value};

/// Kind of delivery-lifecycle event reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Message left the provider
    Sent,
    /// Recipient opened the message
    Open,
    /// Recipient clicked a tracked link
    Click,
    /// Message bounced
    Bounce,
    /// Provider refused to deliver
    Blocked,
    /// Recipient marked the message as spam
    Spam,
    /// Recipient unsubscribed
    Unsub,
    /// Any event type this crate does not know about
    Other(String),
}

impl EventKind {
    /// Returns the provider's name for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sent => "sent",
            Self::Open => "open",
            Self::Click => "click",
            Self::Bounce => "bounce",
            Self::Blocked => "blocked",
            Self::Spam => "spam",
            Self::Unsub => "unsub",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        match name {
            "sent" => Self::Sent,
            "open" => Self::Open,
            "click" => Self::Click,
            "bounce" => Self::Bounce,
            "blocked" => Self::Blocked,
            "spam" => Self::Spam,
            "unsub" => Self::Unsub,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event extracted from a webhook payload.
///
/// Common fields are lifted out; everything else stays in `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    /// Event type
    pub kind: EventKind,
    /// Recipient address, if reported
    pub email: Option<String>,
    /// Unix timestamp in seconds, if reported
    pub time: Option<i64>,
    /// Provider message ID, if reported
    pub message_id: Option<u64>,
    /// Event-specific fields (url, error, `mj_campaign_id`, ...)
    pub fields: Map<String, Value>,
}

impl WebhookEvent {
    /// Extracts an event from one payload item.
    ///
    /// Returns `None` unless `item` is an object with a non-null `event`.
    #[must_use]
    pub fn from_value(item: &Value) -> Option<Self> {
        let object = item.as_object()?;
        let kind = match object.get("event")? {
            Value::Null => return None,
            Value::String(name) => EventKind::from(name.as_str()),
            other => EventKind::Other(other.to_string()),
        };

        let fields = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "event" | "email" | "time" | "MessageID"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            kind,
            email: object.get("email").and_then(Value::as_str).map(ToString::to_string),
            time: object.get("time").and_then(Value::as_i64),
            message_id: object.get("MessageID").and_then(Value::as_u64),
            fields,
        })
    }
}

/// Normalizes a decoded payload into the list of items it carries.
///
/// The provider sends either one event object or an array of them.
#[must_use]
pub fn payload_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        single => vec![single],
    }
}
