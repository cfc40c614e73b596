//! Ghost deploy relay inbound HTTP surface.
//!
//! Receives Ghost webhooks over HTTP, decodes each request into a
//! [`relay::WebhookNotification`], hands it to the [`relay::Dispatcher`], and
//! maps the resulting [`relay::DeployOutcome`] onto a plain-text response.
//!
//! ## Routes
//!
//! | Route | Behaviour |
//! |-------|-----------|
//! | `GET /` | Welcome text |
//! | `POST /webhook/{*route}` | `published`, `updated`, `unpublished`, `deleted` are bound to one Ghost event each; any other path below `/webhook/` is ignored |
//! | `POST /webhook` | Event label read from the `X-Ghost-Event` header |
//! | `POST /webhook-1`, `POST /webhook-2` | Echo receivers for checking what Ghost sends; never trigger |
//!
//! Webhook routes answer `200 Deployment triggered`, `200 Ignored event`, or
//! `500 Failed to trigger deploy`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Routing, body decoding, CORS, and request tracing live
//! here. Inbound webhooks are not authenticated.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

pub mod decode;
pub mod routes;

pub use decode::GHOST_EVENT_HEADER;
pub use routes::{outcome_response, router, AppState, WELCOME};

/// Failures that stop the server. Per-request failures never surface here.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Binds the listen socket.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ListenerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })
}

/// Serves `app` until `shutdown` resolves, then drains in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), ListenerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Webhook server listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ListenerError::Serve)
}
