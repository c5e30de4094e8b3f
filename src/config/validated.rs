//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction,
//! except for credentials, which only `send` needs.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::message::EmailAddress;
use crate::transport::MailjetClient;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Public API key, if configured
    pub api_key: Option<String>,

    /// Secret API key, if configured
    pub secret_key: Option<SecretString>,

    /// Send endpoint
    pub api_url: Url,

    /// Whether requests are validated without delivery
    pub sandbox_mode: bool,

    /// Sender used when a message has none
    pub default_from: Option<EmailAddress>,

    /// Webhook shared secret; `None` accepts unsigned requests
    pub webhook_secret: Option<SecretString>,

    /// Webhook listen address
    pub listen: SocketAddr,

    /// Webhook route path
    pub webhook_path: String,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_from = self
            .default_from
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ api_url: {}, api_key: {}, sandbox_mode: {}, default_from: {}, \
             webhook: {} on {}{} }}",
            self.api_url,
            if self.api_key.is_some() { "set" } else { "unset" },
            self.sandbox_mode,
            default_from,
            if self.webhook_secret.is_some() { "signed" } else { "unsigned" },
            self.listen,
            self.webhook_path,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and the environment variables clap reads for them)
    /// take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API URL is invalid
    /// - The default sender is not a valid address
    /// - The listen address is invalid
    /// - The webhook path does not start with `/`
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api_key = non_empty(cli.api_key.as_deref())
            .or_else(|| non_empty(toml.and_then(|t| t.mailjet.api_key.as_deref())))
        .map(ToString::to_string);

        let secret_key = non_empty(cli.secret_key.as_deref())
            .or_else(|| non_empty(toml.and_then(|t| t.mailjet.secret_key.as_deref())))
        .map(|s| SecretString::new(s.to_string()));

        let api_url = Self::resolve_api_url(cli, toml)?;

        // Flags only enable
        let sandbox_mode = cli.sandbox || toml.is_some_and(|t| t.mailjet.sandbox_mode);

        let default_from = Self::resolve_default_from(cli, toml)?;

        let webhook_secret = non_empty(cli.webhook_secret.as_deref())
            .or_else(|| non_empty(toml.and_then(|t| t.webhook.secret.as_deref())))
        .map(|s| SecretString::new(s.to_string()));

        let listen = Self::resolve_listen(cli, toml)?;
        let webhook_path = Self::resolve_webhook_path(cli, toml)?;

        Ok(Self {
            api_key,
            secret_key,
            api_url,
            sandbox_mode,
            default_from,
            webhook_secret,
            listen,
            webhook_path,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path
    /// (a leading `~/` is expanded to the home directory).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_home(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns both credentials, or which one is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] naming the first absent key.
    pub fn credentials(&self) -> Result<(&str, &SecretString), ConfigError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                "Use --api-key, set MAILJET_API_KEY, or set mailjet.api_key in config file",
            )
        })?;

        let secret_key = self.secret_key.as_ref().ok_or_else(|| {
            ConfigError::missing(
                field::SECRET_KEY,
                "Use --secret-key, set MAILJET_SECRET_KEY, or set mailjet.secret_key in config file",
            )
        })?;

        Ok((api_key, secret_key))
    }

    /// Builds a provider client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing.
    pub fn mailjet_client<H>(&self, http: H) -> Result<MailjetClient<H>, ConfigError> {
        let (api_key, secret_key) = self.credentials()?;

        Ok(
            MailjetClient::new(http, api_key, secret_key.expose_secret().as_str())?
                .with_endpoint(self.api_url.clone())
                .with_sandbox_mode(self.sandbox_mode),
        )
    }

    fn resolve_api_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .api_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.mailjet.api_url.as_deref()))
            .unwrap_or(defaults::API_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_default_from(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<EmailAddress>, ConfigError> {
        let sender = toml.map(|t| &t.sender);

        let Some(email) = non_empty(cli.default_from.as_deref())
            .or_else(|| non_empty(sender.and_then(|s| s.default_from_email.as_deref())))
        else {
            return Ok(None);
        };

        let name = non_empty(cli.default_from_name.as_deref())
            .or_else(|| non_empty(sender.and_then(|s| s.default_from_name.as_deref())));

        let address = match name {
            Some(name) => EmailAddress::with_name(email, name),
            None => EmailAddress::new(email),
        };

        address
            .map(Some)
            .map_err(|source| ConfigError::InvalidDefaultFrom {
                value: email.to_string(),
                source,
            })
    }

    fn resolve_listen(cli: &Cli, toml: Option<&TomlConfig>) -> Result<SocketAddr, ConfigError> {
        let value = cli
            .serve_args()
            .and_then(|s| s.listen.as_deref())
            .or_else(|| toml.and_then(|t| t.webhook.listen.as_deref()))
            .unwrap_or(defaults::LISTEN);

        value
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddress {
                value: value.to_string(),
                source,
            })
    }

    fn resolve_webhook_path(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let path = cli
            .serve_args()
            .and_then(|s| s.path.as_deref())
            .or_else(|| toml.and_then(|t| t.webhook.path.as_deref()))
            .unwrap_or(defaults::WEBHOOK_PATH);

        if !path.starts_with('/') {
            return Err(ConfigError::InvalidWebhookPath(path.to_string()));
        }

        Ok(path.to_string())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expands a leading `~/` to the current user's home directory.
///
/// Paths without the prefix, or systems without a home directory, are
/// returned unchanged.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

// Empty strings (e.g. `MAILJET_API_KEY=`) count as unset.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
