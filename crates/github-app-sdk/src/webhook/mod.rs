//! GitHub webhook support.
//!
//! Webhooks are authenticated by the `X-Hub-Signature-256` header, an
//! HMAC-SHA256 of the raw request body keyed with the app's webhook secret.
//! Validation must run over the bytes exactly as received.

mod validation;

pub use validation::SignatureValidator;

/// Header carrying the HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Header carrying the event type (`push`, `issues`, ...).
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the unique delivery ID.
pub const DELIVERY_HEADER: &str = "x-github-delivery";
