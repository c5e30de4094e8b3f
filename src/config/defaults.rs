//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default send endpoint.
pub const API_URL: &str = crate::transport::DEFAULT_API_URL;

/// Default webhook listen address.
pub const LISTEN: &str = "127.0.0.1:8080";

/// Default webhook route.
pub const WEBHOOK_PATH: &str = crate::webhook::DEFAULT_WEBHOOK_PATH;

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "mailjet-relay.toml";

/// Capacity of the in-process task queue used by `send --queue`.
pub const QUEUE_CAPACITY: usize = 64;
