//! GitHub access used by the handlers.
//!
//! Handlers talk to GitHub only through these two traits so that rules and
//! sync behavior can be tested without HTTP. The SDK's `GitHubClient` and
//! `InstallationClient` are the production implementations.

use async_trait::async_trait;
use github_app_sdk::client::{CreateOrUpdateFileRequest, FileContent, FileUpdateResponse};
use github_app_sdk::{ApiError, GitHubClient, InstallationClient, InstallationId};
use std::sync::Arc;

use crate::RepositoryName;

/// Opens an installation-scoped session.
#[async_trait]
pub trait InstallationConnector: Send + Sync {
    /// Obtain a fresh installation token and return an API bound to it.
    ///
    /// The returned handle is dropped when the handler finishes; tokens are
    /// never shared between deliveries.
    async fn connect(
        &self,
        installation_id: InstallationId,
    ) -> Result<Arc<dyn RepositoryApi>, ApiError>;
}

/// Repository operations performed with an installation token.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Read a file; `ApiError::NotFound` when it does not exist.
    async fn get_file(
        &self,
        repository: &RepositoryName,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<FileContent, ApiError>;

    /// Create or replace a file.
    async fn put_file(
        &self,
        repository: &RepositoryName,
        path: &str,
        request: &CreateOrUpdateFileRequest,
    ) -> Result<FileUpdateResponse, ApiError>;

    /// Comment on an issue or pull request.
    async fn create_comment(
        &self,
        repository: &RepositoryName,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError>;

    /// Add labels to an issue or pull request.
    async fn add_labels(
        &self,
        repository: &RepositoryName,
        number: u64,
        labels: &[String],
    ) -> Result<(), ApiError>;
}

// ============================================================================
// SDK Implementations
// ============================================================================

#[async_trait]
impl InstallationConnector for GitHubClient {
    async fn connect(
        &self,
        installation_id: InstallationId,
    ) -> Result<Arc<dyn RepositoryApi>, ApiError> {
        let client: Arc<dyn RepositoryApi> =
            Arc::new(self.installation_client(installation_id).await?);
        Ok(client)
    }
}

#[async_trait]
impl RepositoryApi for InstallationClient {
    async fn get_file(
        &self,
        repository: &RepositoryName,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<FileContent, ApiError> {
        self.get_file_contents(repository.owner(), repository.name(), path, git_ref)
            .await
    }

    async fn put_file(
        &self,
        repository: &RepositoryName,
        path: &str,
        request: &CreateOrUpdateFileRequest,
    ) -> Result<FileUpdateResponse, ApiError> {
        self.create_or_update_file(repository.owner(), repository.name(), path, request)
            .await
    }

    async fn create_comment(
        &self,
        repository: &RepositoryName,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        self.create_issue_comment(repository.owner(), repository.name(), number, body)
            .await
            .map(|_| ())
    }

    async fn add_labels(
        &self,
        repository: &RepositoryName,
        number: u64,
        labels: &[String],
    ) -> Result<(), ApiError> {
        self.add_labels_to_issue(repository.owner(), repository.name(), number, labels)
            .await
            .map(|_| ())
    }
}
