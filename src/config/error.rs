//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::message::ValidationError;
use crate::transport::CredentialsError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI, environment or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid listen address.
    #[error("Invalid listen address '{value}': {source}")]
    InvalidListenAddress {
        /// The invalid value provided
        value: String,
        /// Underlying parse error
        #[source]
        source: std::net::AddrParseError,
    },

    /// Webhook path is not absolute.
    #[error("Invalid webhook path '{0}': must start with '/'")]
    InvalidWebhookPath(String),

    /// Default sender address is not a valid email address.
    #[error("Invalid default sender '{value}': {source}")]
    InvalidDefaultFrom {
        /// The invalid value provided
        value: String,
        /// Underlying validation error
        #[source]
        source: ValidationError,
    },

    /// Credentials were rejected by the client.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The public API key.
    pub const API_KEY: &str = "api_key";
    /// The secret API key.
    pub const SECRET_KEY: &str = "secret_key";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
