//! Installation-scoped access to GitHub API operations.
//!
//! An `InstallationClient` is bound to one installation token. It is meant
//! to live for the duration of a single webhook and then be dropped.

use crate::auth::{InstallationId, InstallationToken};
use crate::client::{map_transport_error, ClientConfig, GITHUB_ACCEPT, GITHUB_API_VERSION};
use crate::error::ApiError;

/// Installation-scoped GitHub API client.
#[derive(Clone)]
pub struct InstallationClient {
    http_client: reqwest::Client,
    config: ClientConfig,
    token: InstallationToken,
}

impl InstallationClient {
    pub(crate) fn new(
        http_client: reqwest::Client,
        config: ClientConfig,
        token: InstallationToken,
    ) -> Self {
        Self {
            http_client,
            config,
            token,
        }
    }

    /// Get the installation ID this client is bound to.
    pub fn installation_id(&self) -> InstallationId {
        self.token.installation_id()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.config.url_for(path))
            .header("Authorization", format!("Bearer {}", self.token.token()))
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    /// Make an authenticated GET request to the GitHub API.
    ///
    /// Returns the raw response; status handling is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for network or timeout failures.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        self.request(reqwest::Method::GET, path)
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// Make an authenticated POST request with a JSON body.
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ApiError> {
        self.request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// Make an authenticated PUT request with a JSON body.
    pub async fn put<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ApiError> {
        self.request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)
    }
}

impl std::fmt::Debug for InstallationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationClient")
            .field("installation_id", &self.installation_id())
            .field("config", &self.config)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
#[path = "installation_tests.rs"]
mod tests;
