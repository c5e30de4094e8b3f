//! HTTP endpoint for the webhook receiver.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;

use crate::events::EventSink;

use super::{WebhookOutcome, WebhookReceiver};

/// Default route for provider callbacks.
pub const DEFAULT_WEBHOOK_PATH: &str = "/mailjet/webhook";

impl IntoResponse for WebhookOutcome {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Builds a router serving `POST {path}` with the given receiver.
pub fn router<E>(receiver: Arc<WebhookReceiver<E>>, path: &str) -> Router
where
    E: EventSink + 'static,
{
    Router::new()
        .route(path, post(handle_webhook::<E>))
        .with_state(receiver)
}

async fn handle_webhook<E>(
    State(receiver): State<Arc<WebhookReceiver<E>>>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookOutcome
where
    E: EventSink + 'static,
{
    receiver.handle(&headers, &body)
}

/// A bound webhook HTTP server.
pub struct WebhookServer {
    listener: TcpListener,
    router: Router,
}

impl WebhookServer {
    /// Binds the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to `addr` fails.
    pub async fn bind(addr: SocketAddr, router: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(address = %addr, "Webhook server bound");
        Ok(Self { listener, router })
    }

    /// Returns the bound address (useful when binding port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be read.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails while running.
    pub async fn serve<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Webhook server starting");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Webhook server stopped");
        Ok(())
    }
}
