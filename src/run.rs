//! Application execution logic.
//!
//! `send` builds one message from the command line and submits it, either
//! directly or through the in-process task queue. `serve` runs the webhook
//! endpoint until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::signal;

use mailjet_relay::config::{Command, ConfigError, SendArgs, ValidatedConfig, defaults, expand_home};
use mailjet_relay::events::TracingSink;
use mailjet_relay::message::{EmailAddress, EmailMessage, ValidationError};
use mailjet_relay::queue::{ChannelQueue, QueueWorker, SendTaskHandler};
use mailjet_relay::sender::EmailSender;
use mailjet_relay::transport::{ReqwestClient, SendError, SendResponse};
use mailjet_relay::webhook::{self, WebhookReceiver, WebhookServer};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration needed by the command is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The message given on the command line is invalid.
    #[error("Invalid message: {0}")]
    Message(#[from] ValidationError),

    /// The provider call failed.
    #[error("Send failed: {0}")]
    Send(#[from] SendError),

    /// A queued send failed inside the worker.
    #[error("{0} queued message(s) failed to send")]
    QueuedSendFailed(usize),

    /// The queue worker task did not finish cleanly.
    #[error("Queue worker stopped abnormally: {0}")]
    Worker(#[source] tokio::task::JoinError),

    /// Failed to bind the webhook listener.
    #[error("Failed to bind webhook listener on {addr}: {source}")]
    Bind {
        /// Address that could not be bound
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The webhook server failed while running.
    #[error("Webhook server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Runs the selected subcommand.
///
/// `init` is handled before configuration is loaded and is a no-op here.
///
/// # Errors
///
/// Returns the failure of the subcommand.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: Command, config: ValidatedConfig) -> Result<(), RunError> {
    match command {
        Command::Init { .. } => Ok(()),
        Command::Send(args) => execute_send(&args, &config).await,
        Command::Serve(_) => execute_serve(config).await,
    }
}

/// Sends one message built from `args`.
///
/// The provider client is shared between the direct path and the queue
/// worker; the worker is always started and drains once the sender drops.
#[cfg(not(tarpaulin_include))]
async fn execute_send(args: &SendArgs, config: &ValidatedConfig) -> Result<(), RunError> {
    let message = build_message(args)?;
    let client = Arc::new(config.mailjet_client(ReqwestClient::new())?);

    let (queue, receiver) = ChannelQueue::bounded(defaults::QUEUE_CAPACITY);
    let worker = QueueWorker::new(receiver, SendTaskHandler::new(Arc::clone(&client), TracingSink));
    let worker = tokio::spawn(worker.run());

    let mut sender = EmailSender::new(client, queue);
    if let Some(from) = &config.default_from {
        sender = sender.with_default_from(from.clone());
    }

    if args.queue {
        sender.send_async(message).await?;
        drop(sender);

        let stats = worker.await.map_err(RunError::Worker)?;
        tracing::info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            "Queue drained"
        );
        if stats.failed > 0 {
            return Err(RunError::QueuedSendFailed(stats.failed));
        }
        return Ok(());
    }

    let response = sender.send_now(message).await;
    drop(sender);
    worker.await.map_err(RunError::Worker)?;

    report(&response?);
    Ok(())
}

/// Logs the accepted message IDs and prints the provider response.
#[cfg(not(tarpaulin_include))]
fn report(response: &SendResponse) {
    tracing::info!(message_ids = ?response.message_ids(), "Email sent");
    if response.has_partial_failures() {
        tracing::warn!(
            "{} message(s) in the batch were not accepted",
            response.partial_failures().len()
        );
    }
    println!("{:#}", response.body());
}

/// Serves the webhook endpoint until Ctrl+C (or SIGTERM on unix).
#[cfg(not(tarpaulin_include))]
async fn execute_serve(config: ValidatedConfig) -> Result<(), RunError> {
    let receiver = WebhookReceiver::new(TracingSink, config.webhook_secret);
    if !receiver.is_secured() {
        tracing::warn!(
            "No webhook secret configured; every request will be accepted. \
             Set MAILJET_WEBHOOK_SECRET in production"
        );
    }

    let router = webhook::router(Arc::new(receiver), &config.webhook_path);
    let server = WebhookServer::bind(config.listen, router)
        .await
        .map_err(|source| RunError::Bind {
            addr: config.listen,
            source,
        })?;

    tracing::info!(path = %config.webhook_path, "Listening for delivery events");
    server.serve(shutdown_signal()).await.map_err(RunError::Serve)
}

/// Builds the message described by the `send` arguments.
///
/// The sender may be left empty; the default sender fills it later.
fn build_message(args: &SendArgs) -> Result<EmailMessage, ValidationError> {
    let mut message = EmailMessage::create().with_subject(&args.subject);

    if let Some(from) = &args.from {
        let from = match &args.from_name {
            Some(name) => EmailAddress::with_name(from, name)?,
            None => EmailAddress::new(from)?,
        };
        message = message.with_from(from);
    }

    for to in &args.to {
        message = message.add_to(EmailAddress::new(to)?);
    }
    for cc in &args.cc {
        message = message.add_cc(EmailAddress::new(cc)?);
    }
    for bcc in &args.bcc {
        message = message.add_bcc(EmailAddress::new(bcc)?);
    }
    if let Some(reply_to) = &args.reply_to {
        message = message.with_reply_to(EmailAddress::new(reply_to)?);
    }

    if let Some(html) = &args.html {
        message = message.with_html_body(html);
    }
    if let Some(text) = &args.text {
        message = message.with_text_body(text);
    }

    for path in &args.attach {
        message = message.with_attachment_file(&expand_home(path), None)?;
    }

    for (key, value) in &args.vars {
        message = message.with_variable(key, parse_variable(value));
    }
    for (name, value) in &args.headers {
        message = message.with_header(name, value);
    }

    if let Some(priority) = args.priority {
        message = message.with_priority(priority)?;
    }

    Ok(message)
}

/// Interprets a variable as JSON when it parses, otherwise as a string.
fn parse_variable(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received, stopping...");
}
