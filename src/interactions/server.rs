//! Webhook HTTP server
//!
//! `POST /interactions` receives every interaction Discord sends; `GET /health`
//! answers `OK`. Failures are answered with a bare status code:
//!
//! - 401: missing or bad signature
//! - 400: body is not a valid interaction
//! - 500: no handler could be resolved, or the handler failed
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::dispatch::{DispatchError, Dispatcher};
use super::model::Interaction;
use super::verify::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};

#[derive(Clone)]
pub struct AppState {
    verifier: Arc<SignatureVerifier>,
    dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(verifier: SignatureVerifier, dispatcher: Dispatcher) -> Self {
        Self {
            verifier: Arc::new(verifier),
            dispatcher,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/interactions", post(handle_interaction))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind `bind_addr` and serve until the process stops
pub async fn serve(bind_addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("🚀 Listening for interactions on {bind_addr}");

    axum::serve(listener, router(state))
        .await
        .context("interaction server stopped")?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();

    if let Err(e) = state.verifier.verify(
        header(&headers, SIGNATURE_HEADER),
        header(&headers, TIMESTAMP_HEADER),
        &body,
    ) {
        warn!("[{request_id}] 🔒 {e}");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let interaction = match Interaction::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!("[{request_id}] Unparseable interaction body: {e}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state.dispatcher.dispatch(&interaction, request_id).await {
        Ok(response) => response.into_response(),
        Err(DispatchError::Handler(e)) => {
            error!("[{request_id}] ❌ {} handler failed: {e:#}", interaction.kind_name());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            warn!("[{request_id}] Unroutable {}: {e}", interaction.kind_name());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
