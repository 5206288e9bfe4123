//! GitHub API client for authenticated operations.
//!
//! `GitHubClient` makes app-level calls signed with a JWT. Repository-level
//! work goes through an `InstallationClient`, which carries a freshly issued
//! installation token.

mod app;
mod contents;
mod installation;
mod issue;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{AuthenticationProvider, Installation, InstallationId};
use crate::error::ApiError;

pub use app::{App, AppOwner};
pub use contents::{CreateOrUpdateFileRequest, FileCommit, FileContent, FileUpdateResponse};
pub use installation::InstallationClient;
pub use issue::{Comment, CreateCommentRequest, IssueUser, Label};

/// Media type requested on every GitHub REST call.
pub(crate) const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version pinned on every GitHub REST call.
pub(crate) const GITHUB_API_VERSION: &str = "2022-11-28";

/// Configuration for GitHub API client behavior.
///
/// # Examples
///
/// ```
/// use github_app_sdk::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("docs-hub-bot/0.1.0");
/// assert_eq!(config.timeout, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for API requests (required by GitHub)
    pub user_agent: String,
    /// Request timeout duration
    pub timeout: Duration,
    /// GitHub API base URL
    pub github_api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "docs-hub-bot/0.1.0".to_string(),
            timeout: Duration::from_secs(30),
            github_api_url: "https://api.github.com".to_string(),
        }
    }
}

impl ClientConfig {
    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the GitHub API base URL.
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into();
        self
    }

    /// Join an API path onto the base URL.
    pub(crate) fn url_for(&self, path: &str) -> String {
        let normalized_path = path.strip_prefix('/').unwrap_or(path);
        format!(
            "{}/{}",
            self.github_api_url.trim_end_matches('/'),
            normalized_path
        )
    }
}

/// GitHub API client for authenticated operations.
///
/// # Examples
///
/// ```no_run
/// # use github_app_sdk::client::{GitHubClient, ClientConfig};
/// # use github_app_sdk::auth::AuthenticationProvider;
/// # async fn example(auth: impl AuthenticationProvider + 'static) -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitHubClient::builder(auth)
///     .config(ClientConfig::default())
///     .build()?;
///
/// let app = client.get_app().await?;
/// println!("App: {}", app.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GitHubClient {
    auth: Arc<dyn AuthenticationProvider>,
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl GitHubClient {
    /// Create a new builder for constructing a GitHub client.
    pub fn builder(auth: impl AuthenticationProvider + 'static) -> GitHubClientBuilder {
        GitHubClientBuilder::new(Arc::new(auth))
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // App-Level Operations (authenticated with JWT)
    // ========================================================================

    /// Get details about the authenticated GitHub App.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if JWT generation fails, the request fails, or the
    /// response cannot be parsed.
    pub async fn get_app(&self) -> Result<App, ApiError> {
        self.get_as_app("/app").await
    }

    /// List all installations of the authenticated GitHub App.
    ///
    /// Only the first page (GitHub's default of 30) is returned; the service
    /// uses this for a startup log line.
    pub async fn list_installations(&self) -> Result<Vec<Installation>, ApiError> {
        self.get_as_app("/app/installations").await
    }

    async fn get_as_app<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let jwt = self
            .auth
            .app_token()
            .await
            .map_err(|e| ApiError::TokenGenerationFailed {
                message: format!("Failed to generate JWT: {}", e),
            })?;

        let url = self.config.url_for(path);
        debug!(url = %url, "GitHub app-level GET");

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", jwt.token()))
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        Ok(response.json::<T>().await?)
    }

    // ========================================================================
    // Installation-Level Operations
    // ========================================================================

    /// Create an installation-scoped client.
    ///
    /// A new installation token is requested on every call.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TokenGenerationFailed` if the token exchange fails.
    pub async fn installation_client(
        &self,
        installation_id: InstallationId,
    ) -> Result<InstallationClient, ApiError> {
        let token = self
            .auth
            .installation_token(installation_id)
            .await
            .map_err(|e| ApiError::TokenGenerationFailed {
                message: format!(
                    "Failed to obtain token for installation {}: {}",
                    installation_id, e
                ),
            })?;

        Ok(InstallationClient::new(
            self.http_client.clone(),
            self.config.clone(),
            token,
        ))
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("config", &self.config)
            .field("auth", &"<AuthenticationProvider>")
            .finish()
    }
}

/// Builder for constructing `GitHubClient` instances.
pub struct GitHubClientBuilder {
    auth: Arc<dyn AuthenticationProvider>,
    config: Option<ClientConfig>,
}

impl GitHubClientBuilder {
    fn new(auth: Arc<dyn AuthenticationProvider>) -> Self {
        Self { auth, config: None }
    }

    /// Set the client configuration.
    ///
    /// If not set, uses `ClientConfig::default()`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the GitHub client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be created.
    pub fn build(self) -> Result<GitHubClient, ApiError> {
        let config = self.config.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(GitHubClient {
            auth: self.auth,
            http_client,
            config,
        })
    }
}

/// Classify a reqwest send failure.
pub(crate) fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::HttpClientError(error)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
