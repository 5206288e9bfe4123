//! Recording test doubles for the GitHub access traits.

use async_trait::async_trait;
use github_app_sdk::client::{
    CreateOrUpdateFileRequest, FileCommit, FileContent, FileUpdateResponse,
};
use github_app_sdk::{ApiError, InstallationId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::events::{EventInstallation, EventRepository};
use crate::github::{InstallationConnector, RepositoryApi};
use crate::RepositoryName;

/// A call made against [`MockRepositoryApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ApiCall {
    GetFile {
        repository: String,
        path: String,
        git_ref: Option<String>,
    },
    PutFile {
        repository: String,
        path: String,
        message: String,
        content: String,
        sha: Option<String>,
    },
    Comment {
        repository: String,
        number: u64,
        body: String,
    },
    Labels {
        repository: String,
        number: u64,
        labels: Vec<String>,
    },
}

type FileKey = (String, String);

/// In-memory repository API recording every call.
#[derive(Default)]
pub(crate) struct MockRepositoryApi {
    files: Mutex<HashMap<FileKey, FileContent>>,
    failing_reads: Mutex<HashSet<FileKey>>,
    failing_writes: Mutex<HashSet<FileKey>>,
    fail_comments: bool,
    fail_labels: bool,
    pub(crate) calls: Mutex<Vec<ApiCall>>,
}

fn key(repository: &str, path: &str) -> FileKey {
    (repository.to_lowercase(), path.to_string())
}

impl MockRepositoryApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_comments() -> Self {
        Self {
            fail_comments: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_labels() -> Self {
        Self {
            fail_labels: true,
            ..Self::default()
        }
    }

    /// Seed a file; `content` is stored base64 encoded like GitHub returns it.
    pub(crate) fn with_file(self, repository: &str, path: &str, content: &str, sha: &str) -> Self {
        let encoded = CreateOrUpdateFileRequest::new("", content.as_bytes()).content;
        self.files.lock().unwrap().insert(
            key(repository, path),
            FileContent {
                path: path.to_string(),
                sha: sha.to_string(),
                size: content.len() as u64,
                content: Some(encoded),
                encoding: Some("base64".to_string()),
            },
        );
        self
    }

    pub(crate) fn with_failing_read(self, repository: &str, path: &str) -> Self {
        self.failing_reads
            .lock()
            .unwrap()
            .insert(key(repository, path));
        self
    }

    pub(crate) fn with_failing_write(self, repository: &str, path: &str) -> Self {
        self.failing_writes
            .lock()
            .unwrap()
            .insert(key(repository, path));
        self
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn writes(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ApiCall::PutFile { .. }))
            .collect()
    }

    fn server_error() -> ApiError {
        ApiError::HttpError {
            status: 500,
            message: "mock failure".to_string(),
        }
    }
}

#[async_trait]
impl RepositoryApi for MockRepositoryApi {
    async fn get_file(
        &self,
        repository: &RepositoryName,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<FileContent, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::GetFile {
            repository: repository.to_string(),
            path: path.to_string(),
            git_ref: git_ref.map(str::to_string),
        });

        let key = key(repository.full_name(), path);
        if self.failing_reads.lock().unwrap().contains(&key) {
            return Err(Self::server_error());
        }
        self.files
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn put_file(
        &self,
        repository: &RepositoryName,
        path: &str,
        request: &CreateOrUpdateFileRequest,
    ) -> Result<FileUpdateResponse, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::PutFile {
            repository: repository.to_string(),
            path: path.to_string(),
            message: request.message.clone(),
            content: request.content.clone(),
            sha: request.sha.clone(),
        });

        let key = key(repository.full_name(), path);
        if self.failing_writes.lock().unwrap().contains(&key) {
            return Err(Self::server_error());
        }
        Ok(FileUpdateResponse {
            content: None,
            commit: FileCommit {
                sha: format!("commit-for-{}", path),
                html_url: None,
            },
        })
    }

    async fn create_comment(
        &self,
        repository: &RepositoryName,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Comment {
            repository: repository.to_string(),
            number,
            body: body.to_string(),
        });
        if self.fail_comments {
            return Err(ApiError::AuthorizationFailed);
        }
        Ok(())
    }

    async fn add_labels(
        &self,
        repository: &RepositoryName,
        number: u64,
        labels: &[String],
    ) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Labels {
            repository: repository.to_string(),
            number,
            labels: labels.to_vec(),
        });
        if self.fail_labels {
            return Err(Self::server_error());
        }
        Ok(())
    }
}

/// Connector handing out one shared [`MockRepositoryApi`].
pub(crate) struct MockConnector {
    pub(crate) api: Arc<MockRepositoryApi>,
    pub(crate) connections: Mutex<Vec<InstallationId>>,
    fail: bool,
}

impl MockConnector {
    pub(crate) fn new(api: MockRepositoryApi) -> Self {
        Self {
            api: Arc::new(api),
            connections: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(MockRepositoryApi::new())
        }
    }

    pub(crate) fn connection_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }
}

#[async_trait]
impl InstallationConnector for MockConnector {
    async fn connect(
        &self,
        installation_id: InstallationId,
    ) -> Result<Arc<dyn RepositoryApi>, ApiError> {
        self.connections.lock().unwrap().push(installation_id);
        if self.fail {
            return Err(ApiError::TokenGenerationFailed {
                message: "mock token failure".to_string(),
            });
        }
        let api: Arc<dyn RepositoryApi> = self.api.clone();
        Ok(api)
    }
}

// ============================================================================
// Event Fixtures
// ============================================================================

pub(crate) fn event_repository(full_name: &str) -> EventRepository {
    EventRepository {
        full_name: full_name.parse().unwrap(),
        default_branch: Some("main".to_string()),
    }
}

pub(crate) fn event_installation(id: u64) -> Option<EventInstallation> {
    Some(EventInstallation {
        id: InstallationId::new(id),
    })
}
