//! # GitHub App SDK
//!
//! The GitHub plumbing used by Docs Hub Bot: GitHub App authentication,
//! a small REST client and webhook signature validation.
//!
//! This SDK provides:
//! - App JWT generation (RS256) and installation token exchange
//! - App-level calls (`/app`, `/app/installations`)
//! - Installation-scoped calls for repository contents, issue comments and labels
//! - HMAC-SHA256 validation of `X-Hub-Signature-256` headers
//!
//! # Examples
//!
//! ## Identifiers
//!
//! ```rust
//! use github_app_sdk::auth::{GitHubAppId, InstallationId};
//!
//! let app_id = GitHubAppId::new(123456);
//! let installation_id = InstallationId::new(789012);
//! assert_eq!(app_id.to_string(), "123456");
//! assert_eq!(installation_id.as_u64(), 789012);
//! ```
//!
//! ## Validating a webhook
//!
//! ```rust
//! use github_app_sdk::webhook::SignatureValidator;
//!
//! let validator = SignatureValidator::new("my-secret");
//! let valid = validator
//!     .validate(b"{}", "sha256=0000")
//!     .unwrap_or(false);
//! assert!(!valid);
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod webhook;

// Re-export commonly used types at crate root for convenience
pub use error::{ApiError, AuthError, ValidationError};

pub use auth::{
    AuthenticationProvider, GitHubAppId, Installation, InstallationId, InstallationToken,
    JsonWebToken, JwtClaims, PrivateKey,
};
pub use client::{ClientConfig, GitHubClient, InstallationClient};
pub use webhook::SignatureValidator;
