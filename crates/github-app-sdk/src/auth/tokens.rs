//! GitHub App token exchange and the `AuthenticationProvider` implementation.
//!
//! Installation tokens are requested on demand and never cached; each
//! webhook that writes to GitHub gets its own token.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    AuthenticationProvider, GitHubAppId, InstallationId, InstallationToken, JsonWebToken,
    JwtGenerator, PrivateKey, RS256JwtGenerator,
};
use crate::client::{GITHUB_ACCEPT, GITHUB_API_VERSION};
use crate::error::AuthError;

/// Configuration for authentication behavior.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT expiration duration (max 10 minutes per GitHub)
    pub jwt_expiration: Duration,

    /// GitHub API endpoint (for GitHub Enterprise support)
    pub github_api_url: String,

    /// User agent for GitHub API requests
    pub user_agent: String,

    /// Timeout for the token exchange request
    pub timeout: std::time::Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_expiration: Duration::minutes(10),
            github_api_url: "https://api.github.com".to_string(),
            user_agent: "docs-hub-bot".to_string(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}

/// Body of `POST /app/installations/{id}/access_tokens`.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    token: String,
    expires_at: DateTime<Utc>,
}

/// GitHub App authentication provider.
///
/// Signs app JWTs with the configured generator and exchanges them for
/// installation tokens.
///
/// # Examples
///
/// ```no_run
/// # use github_app_sdk::auth::{AuthConfig, GitHubAppAuth, GitHubAppId, PrivateKey};
/// # fn example(key: PrivateKey) {
/// let auth = GitHubAppAuth::new(GitHubAppId::new(123), key, AuthConfig::default())
///     .expect("http client");
/// # }
/// ```
pub struct GitHubAppAuth {
    app_id: GitHubAppId,
    jwt_generator: Arc<dyn JwtGenerator>,
    http: reqwest::Client,
    config: AuthConfig,
}

impl GitHubAppAuth {
    /// Create a provider that signs JWTs with the app's RSA key.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NetworkError` if the HTTP client cannot be built.
    pub fn new(
        app_id: GitHubAppId,
        private_key: PrivateKey,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let generator = RS256JwtGenerator::with_expiration(
            private_key,
            config.jwt_expiration.min(Duration::minutes(10)),
        );
        Self::with_generator(app_id, Arc::new(generator), config)
    }

    /// Create a provider with a custom JWT generator.
    pub fn with_generator(
        app_id: GitHubAppId,
        jwt_generator: Arc<dyn JwtGenerator>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        Ok(Self {
            app_id,
            jwt_generator,
            http,
            config,
        })
    }

    /// Get the GitHub App ID.
    pub fn app_id(&self) -> GitHubAppId {
        self.app_id
    }

    /// Get configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[async_trait]
impl AuthenticationProvider for GitHubAppAuth {
    async fn app_token(&self) -> Result<JsonWebToken, AuthError> {
        self.jwt_generator.generate_jwt(self.app_id).await
    }

    async fn installation_token(
        &self,
        installation_id: InstallationId,
    ) -> Result<InstallationToken, AuthError> {
        let jwt = self.app_token().await?;

        let url = format!(
            "{}/app/installations/{}/access_tokens",
            self.config.github_api_url.trim_end_matches('/'),
            installation_id
        );

        debug!(installation_id = %installation_id, "Requesting installation token");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", jwt.token()))
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(
                installation_id = %installation_id,
                status = status.as_u16(),
                "Installation token request rejected"
            );
            return Err(match status.as_u16() {
                401 => AuthError::InvalidCredentials,
                404 => AuthError::InstallationNotFound { installation_id },
                code => AuthError::GitHubApiError {
                    status: code,
                    message,
                },
            });
        }

        let body: AccessTokenResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::InvalidTokenResponse {
                    message: e.to_string(),
                })?;

        Ok(InstallationToken::new(
            body.token,
            installation_id,
            body.expires_at,
        ))
    }
}

#[cfg(test)]
#[path = "tokens_tests.rs"]
mod tests;
