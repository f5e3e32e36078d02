//! The webhook server.
//!
//! One route, POST only. Each inbound request walks the same pipeline:
//! signature gate → payload parse → router dispatch → response encode. The
//! raw body bytes feed the signature check before any parsing happens.
//!
//! Missing signature headers and failed verification are deliberately
//! indistinguishable to the caller: both produce an empty 401.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use parley_core::parse_interaction;
use parley_framework::InteractionRouter;

use crate::encode::encode_outgoing;
use crate::error::TransportResult;
use crate::verify::SignatureVerifier;

/// Header carrying the hex-encoded Ed25519 signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
/// Header carrying the decimal timestamp the signature covers.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Shared state for the webhook route.
pub struct WebhookState {
    /// The signature gate.
    pub verifier: SignatureVerifier,
    /// The dispatch state machine.
    pub router: InteractionRouter,
}

impl WebhookState {
    /// Bundles a verifier and router into route state.
    pub fn new(verifier: SignatureVerifier, router: InteractionRouter) -> Self {
        Self { verifier, router }
    }
}

/// Handle to a running webhook listener.
///
/// Dropping the handle leaves the server running; call
/// [`ListenerHandle::shutdown`] to stop it.
pub struct ListenerHandle {
    name: String,
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
}

impl ListenerHandle {
    fn new(name: String, local_addr: SocketAddr, shutdown: oneshot::Sender<()>) -> Self {
        Self {
            name,
            local_addr,
            shutdown,
        }
    }

    /// Listener name, for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signals the server to stop accepting requests.
    pub fn shutdown(self) {
        let _ = self.shutdown.send(());
    }
}

/// Binds the webhook route and serves it in a background task.
pub async fn serve(
    addr: &str,
    path: &str,
    state: Arc<WebhookState>,
) -> TransportResult<ListenerHandle> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    let router = Router::new()
        .route(&path, post(webhook_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, path = %path, "webhook server listening");

    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

    tokio::spawn(async move {
        let server = axum::serve(listener, router);

        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    error!(error = %e, "webhook server error");
                }
            }
            _ = &mut shutdown_rx => {
                info!("webhook server shutting down");
            }
        }
    });

    Ok(ListenerHandle::new(
        format!("webhook-{local_addr}"),
        local_addr,
        shutdown_tx,
    ))
}

/// The webhook POST handler.
async fn webhook_handler(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let timestamp = headers.get(TIMESTAMP_HEADER).and_then(|v| v.to_str().ok());

    // Reject before any cryptographic work when a header is absent.
    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        debug!("request missing signature headers");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    if !state.verifier.verify(timestamp, &body, signature) {
        debug!("request failed signature verification");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let raw = match std::str::from_utf8(&body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "request body is not UTF-8");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let interaction = match parse_interaction(raw) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!(error = %e, "failed to parse interaction payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let outgoing = match state.router.dispatch(interaction).await {
        Ok(outgoing) => outgoing,
        Err(e) => {
            // Configuration error: a command reached dispatch without a
            // registry entry. Surfaced to operators, not to the user.
            error!(error = %e, "interaction dispatch failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match encode_outgoing(&outgoing) {
        Ok(encoded) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoded.content_type)],
            encoded.bytes,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
