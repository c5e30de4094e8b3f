//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Provider credentials and endpoint
    #[serde(default)]
    pub mailjet: MailjetSection,

    /// Default sender
    #[serde(default)]
    pub sender: SenderSection,

    /// Webhook receiver
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// Provider configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailjetSection {
    /// Public API key
    pub api_key: Option<String>,

    /// Secret API key
    pub secret_key: Option<String>,

    /// Validate without delivering
    #[serde(default)]
    pub sandbox_mode: bool,

    /// Send endpoint override
    pub api_url: Option<String>,
}

/// Default sender configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SenderSection {
    /// Address used when a message has no sender
    pub default_from_email: Option<String>,

    /// Display name for the default sender
    pub default_from_name: Option<String>,
}

/// Webhook receiver configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Shared secret for signature verification
    pub secret: Option<String>,

    /// Socket address to listen on
    pub listen: Option<String>,

    /// Route path
    pub path: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Mailjet Relay Configuration File

[mailjet]
# Credentials (required for `send`)
# Prefer the MAILJET_API_KEY / MAILJET_SECRET_KEY environment variables
# over storing secrets in this file.
# api_key = "your-api-key"
# secret_key = "your-secret-key"

# Validate requests without delivering mail (default: false)
# Note: --sandbox on the command line can only enable this, not disable it
sandbox_mode = false

# Send endpoint (default: https://api.mailjet.com/v3.1/send)
# api_url = "https://api.mailjet.com/v3.1/send"

[sender]
# Sender used when a message has none
# default_from_email = "noreply@example.com"
# default_from_name = "Example App"

[webhook]
# Shared secret for X-Mailjet-Signature verification.
# Leave unset only in development: unsigned requests are then accepted.
# Prefer the MAILJET_WEBHOOK_SECRET environment variable.
# secret = "your-webhook-secret"

# Listen address for `serve` (default: 127.0.0.1:8080)
# listen = "127.0.0.1:8080"

# Route path (default: /mailjet/webhook)
# path = "/mailjet/webhook"
"#
    .to_string()
}
