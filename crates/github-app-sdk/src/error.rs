//! Error types for GitHub App SDK operations.
//!
//! Every failure is classified as transient or permanent so callers can log
//! it meaningfully. The SDK itself never retries.

use thiserror::Error;

use crate::auth::InstallationId;

/// Authentication-related errors.
///
/// Covers private key problems, JWT signing and the exchange of an app JWT
/// for an installation token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid GitHub App credentials (non-retryable).
    #[error("Invalid GitHub App credentials")]
    InvalidCredentials,

    /// Installation not found or access denied (non-retryable).
    #[error("Installation {installation_id} not found or access denied")]
    InstallationNotFound { installation_id: InstallationId },

    /// Invalid private key format or data (non-retryable).
    #[error("Invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    /// JWT generation failed (non-retryable).
    #[error("JWT generation failed: {message}")]
    JwtGenerationFailed { message: String },

    /// GitHub API returned an error response.
    #[error("GitHub API error: {status} - {message}")]
    GitHubApiError { status: u16, message: String },

    /// The token response could not be understood.
    #[error("Invalid token response: {message}")]
    InvalidTokenResponse { message: String },

    /// Network connectivity or transport error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl AuthError {
    /// Check if this error represents a transient condition that may succeed if retried.
    ///
    /// Network failures, server errors (5xx) and rate limiting (429) are
    /// transient. Credential, key and permission problems are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::InvalidCredentials => false,
            Self::InstallationNotFound { .. } => false,
            Self::InvalidPrivateKey { .. } => false,
            Self::JwtGenerationFailed { .. } => false,
            Self::GitHubApiError { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidTokenResponse { .. } => false,
            Self::NetworkError(_) => true,
        }
    }
}

/// Errors during GitHub API operations.
///
/// These errors represent failures when communicating with the GitHub API,
/// including HTTP errors and parsing failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error response from GitHub API.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// Request to GitHub API timed out.
    #[error("Request timeout")]
    Timeout,

    /// The request was invalid (422).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The write conflicted with the current state of the resource (409).
    ///
    /// For the contents API this means the supplied blob SHA is stale.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Authentication to GitHub API failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Authorization check failed (insufficient permissions).
    #[error("Authorization failed")]
    AuthorizationFailed,

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// An app JWT or installation token could not be obtained.
    #[error("Token generation failed: {message}")]
    TokenGenerationFailed { message: String },

    /// The client could not be constructed.
    #[error("Client configuration error: {message}")]
    Configuration { message: String },

    /// The response parsed but its content is unusable.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Failed to parse JSON response from GitHub API.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP client error (network, TLS, etc.).
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

impl ApiError {
    /// Check if this error represents a transient condition that may succeed if retried.
    ///
    /// Transient conditions include:
    /// - Server errors (5xx)
    /// - Rate limiting (429)
    /// - Request timeouts
    /// - Network/transport errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout => true,
            Self::InvalidRequest { .. } => false,
            Self::Conflict { .. } => false,
            Self::AuthenticationFailed => false,
            Self::AuthorizationFailed => false,
            Self::NotFound => false,
            Self::TokenGenerationFailed { .. } => false,
            Self::Configuration { .. } => false,
            Self::InvalidResponse { .. } => false,
            Self::JsonError(_) => false,
            Self::HttpClientError(e) => !e.is_decode(),
        }
    }

    /// Map a non-success HTTP response onto the matching error variant.
    ///
    /// The body is read for 409, 422 and unclassified statuses so that the
    /// GitHub error message ends up in the logs.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        match status {
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            409 => Self::Conflict {
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Conflict".to_string()),
            },
            422 => Self::InvalidRequest {
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Validation failed".to_string()),
            },
            _ => Self::HttpError {
                status,
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            },
        }
    }
}

/// Input validation errors.
///
/// These errors occur when validating configuration data or webhook headers.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("Required field missing: {field}")]
    Required { field: String },

    /// A field has an invalid format.
    #[error("Invalid format for {field}: {message}")]
    InvalidFormat { field: String, message: String },

    /// The webhook signature header is malformed.
    #[error("Invalid signature format: {message}")]
    InvalidSignatureFormat { message: String },

    /// The HMAC could not be computed.
    #[error("HMAC computation failed: {message}")]
    HmacError { message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
