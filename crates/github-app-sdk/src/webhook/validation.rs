//! Webhook signature validation implementation.
//!
//! Provides HMAC-SHA256 signature validation for GitHub webhooks using
//! constant-time comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::ValidationError;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

/// Validates GitHub webhook signatures using HMAC-SHA256.
///
/// # Security
///
/// - Uses constant-time comparison
/// - Never logs secrets or signature values
/// - Validates signature format before HMAC computation
///
/// # Examples
///
/// ```rust
/// use github_app_sdk::webhook::SignatureValidator;
///
/// let validator = SignatureValidator::new("webhook-secret");
/// let payload = br#"{"action":"opened"}"#;
/// let signature = validator.sign(payload).unwrap();
///
/// assert!(validator.validate(payload, &signature).unwrap());
/// assert!(!validator.validate(b"{}", &signature).unwrap());
/// ```
#[derive(Clone)]
pub struct SignatureValidator {
    secret: Vec<u8>,
}

impl SignatureValidator {
    /// Create a new signature validator for the given webhook secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Validate a webhook signature.
    ///
    /// # Arguments
    ///
    /// * `payload` - The raw webhook payload bytes
    /// * `signature` - The `X-Hub-Signature-256` header value (`sha256=<hex>`)
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Signature is valid
    /// * `Ok(false)` - Signature is well formed but does not match
    /// * `Err` - Signature header is malformed
    pub fn validate(&self, payload: &[u8], signature: &str) -> Result<bool, ValidationError> {
        let signature_bytes = parse_signature(signature)?;
        let expected_hmac = self.compute_hmac(payload)?;

        Ok(constant_time_compare(&signature_bytes, &expected_hmac))
    }

    /// Produce the `sha256=<hex>` header value for a payload.
    ///
    /// Used by tests and tooling that need to emit signed deliveries.
    pub fn sign(&self, payload: &[u8]) -> Result<String, ValidationError> {
        let digest = self.compute_hmac(payload)?;
        Ok(format!("{}{}", PREFIX, hex::encode(digest)))
    }

    fn compute_hmac(&self, payload: &[u8]) -> Result<Vec<u8>, ValidationError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret).map_err(|e| {
            ValidationError::HmacError {
                message: format!("Failed to create HMAC instance: {}", e),
            }
        })?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Extract the digest bytes from GitHub's `sha256=<hex>` format.
fn parse_signature(signature: &str) -> Result<Vec<u8>, ValidationError> {
    let hex_signature =
        signature
            .trim()
            .strip_prefix(PREFIX)
            .ok_or_else(|| ValidationError::InvalidSignatureFormat {
                message: format!("Signature must start with '{}'", PREFIX),
            })?;

    hex::decode(hex_signature).map_err(|e| ValidationError::InvalidSignatureFormat {
        message: format!("Invalid hex encoding in signature: {}", e),
    })
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    // Length is not secret
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

// Security: Don't expose secrets in debug output
impl std::fmt::Debug for SignatureValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureValidator")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
