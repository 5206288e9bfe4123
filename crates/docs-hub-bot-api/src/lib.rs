//! # Docs Hub Bot HTTP Service
//!
//! HTTP surface of the Docs Hub Bot GitHub App.
//!
//! This service provides:
//! - `GET /` health check reporting the authenticated app identity
//! - the webhook endpoint (`POST /webhook` by default) with HMAC-SHA256
//!   signature verification over the raw request body
//! - server start-up and graceful shutdown

pub mod config;
pub mod errors;

pub use config::{GitHubConfig, LoggingConfig, ServerConfig, ServiceConfig, WebhookSecret};
pub use errors::{ConfigError, ServiceError, WebhookHandlerError};

use axum::{
    extract::{DefaultBodyLimit, State},
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use docs_hub_bot_core::EventDispatcher;
use github_app_sdk::webhook::{DELIVERY_HEADER, EVENT_HEADER, SIGNATURE_HEADER};
use github_app_sdk::SignatureValidator;
use serde::{Deserialize, Serialize};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info, instrument, warn, Span};

/// Body returned when a delivery was verified and handled.
pub const EVENT_PROCESSED_BODY: &str = "Event processed";

// ============================================================================
// Application State
// ============================================================================

/// Identity of the GitHub App, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub name: String,
    pub id: u64,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: Arc<ServiceConfig>,

    /// Routes verified deliveries to handlers
    pub dispatcher: Arc<EventDispatcher>,

    /// Verifies `X-Hub-Signature-256`
    pub validator: Arc<SignatureValidator>,

    /// Reported by the health check
    pub identity: AppIdentity,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServiceConfig, dispatcher: Arc<EventDispatcher>, identity: AppIdentity) -> Self {
        let validator = SignatureValidator::new(config.github.webhook_secret.expose());
        Self {
            config: Arc::new(config),
            dispatcher,
            validator: Arc::new(validator),
            identity,
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    #[serde(rename = "appId")]
    pub app_id: u64,
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let webhook_path = state.config.server.webhook_path.clone();
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .route("/", get(handle_health_check))
        .route(&webhook_path, post(handle_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .into_inner(),
        )
        .with_state(state)
}

/// Start HTTP server and run until SIGINT or SIGTERM.
///
/// In-flight requests get `server.shutdown_timeout_seconds` to finish once a
/// signal arrives; after that the server returns without waiting for them.
pub async fn start_server(state: AppState) -> Result<(), ServiceError> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let shutdown_timeout = Duration::from_secs(state.config.server.shutdown_timeout_seconds);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| ServiceError::BindFailed {
            address: format!("{}:{}", host, port),
            message: e.to_string(),
        })?;

    let address = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| format!("{}:{}", host, port));
    info!(address = %address, "Starting HTTP server");

    let shutdown_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_started.clone(), shutdown_timeout))
        .into_future();

    let drain_deadline = async {
        shutdown_started.notified().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| ServiceError::ServerFailed {
                message: e.to_string(),
            })?;
        }
        _ = drain_deadline => {
            warn!(
                timeout_seconds = shutdown_timeout.as_secs(),
                "Graceful shutdown timed out, abandoning in-flight requests"
            );
        }
    }

    info!("HTTP server shutdown complete");
    Ok(())
}

async fn shutdown_signal(started: Arc<Notify>, timeout: Duration) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown with {}s timeout", timeout.as_secs());
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown with {}s timeout", timeout.as_secs());
        },
    }

    started.notify_one();
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle the health check.
async fn handle_health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running".to_string(),
        app: state.identity.name.clone(),
        app_id: state.identity.id,
    })
}

/// Handle GitHub webhook deliveries
///
/// 1. Verify the signature over the raw body; reject with 401 before any
///    parsing when it does not match
/// 2. Dispatch the event and wait for its handler to finish
/// 3. Reply 200 `Event processed`, or 500 `Processing error` on failure
#[instrument(skip_all, fields(
    event_type = tracing::field::Empty,
    delivery_id = tracing::field::Empty,
))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookHandlerError> {
    let event_type = header_str(&headers, EVENT_HEADER);
    let delivery_id = header_str(&headers, DELIVERY_HEADER);

    let span = Span::current();
    if let Some(event_type) = event_type {
        span.record("event_type", event_type);
    }
    if let Some(delivery_id) = delivery_id {
        span.record("delivery_id", delivery_id);
    }

    verify_signature(&state.validator, &headers, &body)?;
    info!(bytes = body.len(), "Received verified webhook delivery");

    let outcome = state.dispatcher.dispatch(event_type, delivery_id, &body).await?;
    debug!(outcome = ?outcome, "Webhook handled");

    Ok(EVENT_PROCESSED_BODY)
}

fn verify_signature(
    validator: &SignatureValidator,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), WebhookHandlerError> {
    let signature =
        header_str(headers, SIGNATURE_HEADER).ok_or_else(|| WebhookHandlerError::InvalidSignature {
            reason: format!("missing {} header", SIGNATURE_HEADER),
        })?;

    match validator.validate(body, signature) {
        Ok(true) => Ok(()),
        Ok(false) => Err(WebhookHandlerError::InvalidSignature {
            reason: "signature mismatch".to_string(),
        }),
        Err(e) => Err(WebhookHandlerError::InvalidSignature {
            reason: e.to_string(),
        }),
    }
}

/// Header value as UTF-8; non-UTF-8 values are treated as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
