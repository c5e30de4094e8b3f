//! Decoded send API responses.

use serde_json::Value;

/// A per-message result whose `Status` was present and not `"success"`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialFailure {
    /// Position of the message in the submitted batch
    pub index: usize,
    /// Status reported by the provider
    pub status: String,
    /// The provider's `Errors` array, or `Null` if absent
    pub errors: Value,
}

/// The decoded body of a successful (HTTP 200) send call.
///
/// The body is kept exactly as the provider returned it; the helper
/// methods only read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SendResponse {
    body: Value,
}

impl SendResponse {
    /// Success status string used by the provider.
    pub const SUCCESS: &'static str = "success";

    /// Wraps a decoded response body.
    #[must_use]
    pub const fn new(body: Value) -> Self {
        Self { body }
    }

    /// Returns the decoded body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the response, returning the decoded body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    fn message_results(&self) -> &[Value] {
        self.body
            .get("Messages")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns every message entry whose status is present and not success.
    ///
    /// An unexpected body shape yields no failures.
    #[must_use]
    pub fn partial_failures(&self) -> Vec<PartialFailure> {
        self.message_results()
            .iter()
            .enumerate()
            .filter_map(|(index, result)| {
                let status = result.get("Status")?;
                let status = status.as_str().map_or_else(|| status.to_string(), ToString::to_string);
                (status != Self::SUCCESS).then(|| PartialFailure {
                    index,
                    status,
                    errors: result.get("Errors").cloned().unwrap_or(Value::Null),
                })
            })
            .collect()
    }

    /// Returns true if any message in the batch reported a non-success status.
    #[must_use]
    pub fn has_partial_failures(&self) -> bool {
        !self.partial_failures().is_empty()
    }

    /// Collects the provider message IDs of every accepted recipient.
    ///
    /// IDs may arrive as numbers or numeric strings; anything else is skipped.
    #[must_use]
    pub fn message_ids(&self) -> Vec<u64> {
        self.message_results()
            .iter()
            .filter_map(|result| result.get("To").and_then(Value::as_array))
            .flatten()
            .filter_map(|recipient| recipient.get("MessageID"))
            .filter_map(|id| id.as_u64().or_else(|| id.as_str()?.parse().ok()))
            .collect()
    }
}
