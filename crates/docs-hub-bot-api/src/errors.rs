//! Error types for the HTTP service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use docs_hub_bot_core::DispatchError;
use tracing::warn;

/// Webhook handler errors with HTTP status code mapping
///
/// GitHub only inspects the status code, so bodies are short fixed strings
/// that never echo payload content or internal error detail:
///
/// - `401 Unauthorized`: signature missing, malformed or wrong. The payload
///   is never parsed.
/// - `500 Internal Server Error`: the signature was valid but the event
///   could not be handled. Details are logged by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// Signature verification failed
    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// Dispatch or handler failure after successful verification
    #[error("Processing failed: {0}")]
    ProcessingFailed(#[from] DispatchError),
}

impl WebhookHandlerError {
    /// Body sent for signature failures.
    pub const INVALID_SIGNATURE_BODY: &'static str = "Invalid signature";

    /// Body sent for processing failures.
    pub const PROCESSING_ERROR_BODY: &'static str = "Processing error";

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSignature { .. } => StatusCode::UNAUTHORIZED,
            Self::ProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::InvalidSignature { reason } => {
                warn!(reason = %reason, "Rejected webhook with invalid signature");
                Self::INVALID_SIGNATURE_BODY
            }
            Self::ProcessingFailed(_) => Self::PROCESSING_ERROR_BODY,
        };

        (self.status_code(), body).into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl ServiceError {
    /// Process exit code for this failure.
    ///
    /// - `1`: the listener could not bind
    /// - `2`: the server stopped with an error
    /// - `3`: configuration or credentials are invalid
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BindFailed { .. } => 1,
            Self::ServerFailed { .. } => 2,
            Self::Configuration(_) => 3,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Configuration parsing failed: {message}")]
    Parsing { message: String },
}
