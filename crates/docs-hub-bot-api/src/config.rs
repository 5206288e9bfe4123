//! Configuration types for the HTTP service

use docs_hub_bot_core::BotConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::ConfigError;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// GitHub App credentials and API client settings
    pub github: GitHubConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Automation rules
    pub bot: BotConfig,
}

impl ServiceConfig {
    /// Check the configuration before any network resource is created.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.github.validate()?;
        self.bot.validate().map_err(|e| ConfigError::Invalid {
            message: format!("bot: {}", e),
        })
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Path receiving webhook deliveries
    pub webhook_path: String,

    /// Maximum request size in bytes
    pub max_body_size: usize,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            webhook_path: "/webhook".to_string(),
            max_body_size: 25 * 1024 * 1024, // GitHub caps payloads at 25MB
            shutdown_timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.webhook_path.starts_with('/') || self.webhook_path.len() < 2 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "server.webhook_path must be an absolute path other than '/', got '{}'",
                    self.webhook_path
                ),
            });
        }
        if self.max_body_size == 0 {
            return Err(ConfigError::Invalid {
                message: "server.max_body_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// GitHub App configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Numeric GitHub App ID
    pub app_id: u64,

    /// Path to the App's PEM private key
    pub private_key_path: String,

    /// Shared secret used to sign webhook deliveries
    pub webhook_secret: WebhookSecret,

    /// GitHub REST API base URL
    pub api_url: String,

    /// User-Agent sent with every GitHub request
    pub user_agent: String,

    /// Outbound request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            app_id: 0,
            private_key_path: String::new(),
            webhook_secret: WebhookSecret::default(),
            api_url: "https://api.github.com".to_string(),
            user_agent: "docs-hub-bot".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl GitHubConfig {
    /// Outbound request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id == 0 {
            return Err(ConfigError::Missing {
                key: "github.app_id".to_string(),
            });
        }
        if self.private_key_path.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "github.private_key_path".to_string(),
            });
        }
        if self.webhook_secret.is_empty() {
            return Err(ConfigError::Missing {
                key: "github.webhook_secret".to_string(),
            });
        }
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                message: format!("github.api_url must be an http(s) URL, got '{}'", self.api_url),
            });
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                message: "github.request_timeout_seconds must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Webhook shared secret, wiped from memory on drop.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Secret bytes for HMAC computation.
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level, or a full `EnvFilter` directive
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
