//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::defaults;

/// Mailjet Relay: send transactional email and receive delivery events
///
/// Sends messages through the Mailjet batch send API and serves the
/// signed webhook endpoint Mailjet calls with delivery events.
#[derive(Debug, Parser)]
#[command(name = "mailjet-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Mailjet public API key
    #[arg(long = "api-key", global = true, env = "MAILJET_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Mailjet secret API key
    #[arg(
        long = "secret-key",
        global = true,
        env = "MAILJET_SECRET_KEY",
        hide_env_values = true
    )]
    pub secret_key: Option<String>,

    /// Validate requests without delivering mail
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Override the send endpoint
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Shared secret for webhook signatures
    #[arg(
        long = "webhook-secret",
        global = true,
        env = "MAILJET_WEBHOOK_SECRET",
        hide_env_values = true
    )]
    pub webhook_secret: Option<String>,

    /// Sender address used when a message has none
    #[arg(long = "default-from", global = true, value_name = "EMAIL")]
    pub default_from: Option<String>,

    /// Display name for the default sender
    #[arg(long = "default-from-name", global = true, value_name = "NAME")]
    pub default_from_name: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for mailjet-relay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Send one email
    Send(SendArgs),

    /// Serve the delivery-event webhook
    Serve(ServeArgs),
}

/// Message content for the `send` subcommand.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Sender address (falls back to the default sender)
    #[arg(long, value_name = "EMAIL")]
    pub from: Option<String>,

    /// Sender display name
    #[arg(long = "from-name", value_name = "NAME")]
    pub from_name: Option<String>,

    /// Primary recipient (can be specified multiple times)
    #[arg(long, value_name = "EMAIL", required = true)]
    pub to: Vec<String>,

    /// Carbon-copy recipient (can be specified multiple times)
    #[arg(long, value_name = "EMAIL")]
    pub cc: Vec<String>,

    /// Blind carbon-copy recipient (can be specified multiple times)
    #[arg(long, value_name = "EMAIL")]
    pub bcc: Vec<String>,

    /// Reply-to address
    #[arg(long = "reply-to", value_name = "EMAIL")]
    pub reply_to: Option<String>,

    /// Subject line
    #[arg(long)]
    pub subject: String,

    /// HTML body
    #[arg(long)]
    pub html: Option<String>,

    /// Plain-text body
    #[arg(long)]
    pub text: Option<String>,

    /// File to attach (can be specified multiple times)
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<PathBuf>,

    /// Template variable in 'Key=Value' format (can be specified multiple times)
    #[arg(long = "var", value_name = "K=V", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,

    /// Custom header in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", value_parser = parse_key_value)]
    pub headers: Vec<(String, String)>,

    /// Priority from 1 (highest) to 5 (lowest)
    #[arg(long)]
    pub priority: Option<u8>,

    /// Route the message through the in-process task queue
    #[arg(long)]
    pub queue: bool,
}

/// Options for the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Route path for webhook callbacks
    #[arg(long)]
    pub path: Option<String>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Like [`parse_from_iter`](Self::parse_from_iter) but returns the clap
    /// error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid or missing arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }

    /// Returns the `serve` options, if that is the command.
    #[must_use]
    pub const fn serve_args(&self) -> Option<&ServeArgs> {
        match &self.command {
            Command::Serve(args) => Some(args),
            _ => None,
        }
    }
}

/// Splits `Key=Value` or `Key: Value`, trimming both sides.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .or_else(|| s.split_once(':'))
        .ok_or_else(|| format!("expected 'Key=Value' or 'Key: Value', got '{s}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }

    Ok((key.to_string(), value.trim().to_string()))
}
