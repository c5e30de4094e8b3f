//! Configuration layer for Mailjet Relay.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Environment variables** - `MAILJET_API_KEY`, `MAILJET_SECRET_KEY`,
//!    `MAILJET_WEBHOOK_SECRET` (read by clap as fallbacks for their flags)
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Empty values count as unset at every level.
//!
//! # Boolean Flag Semantics
//!
//! `--sandbox` uses OR semantics: if set `true` in either CLI or TOML, the
//! result is `true`. The flag only enables, never disables.
//!
//! # Credentials
//!
//! Credentials are optional at load time because `serve` and `init` do not
//! need them. [`ValidatedConfig::credentials`] reports the missing one when
//! `send` asks for them.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command, SendArgs, ServeArgs};
pub use error::{ConfigError, field};
pub use toml::{MailjetSection, SenderSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, expand_home, write_default_config};
