//! Cross-repository file sync.
//!
//! Copies one file from a source repository to a path in a target
//! repository. Every sync is an independent best-effort overwrite: failures
//! are logged and reported as a [`FileSyncResult`], never raised.

use github_app_sdk::client::CreateOrUpdateFileRequest;
use github_app_sdk::ApiError;
use tracing::{error, info, warn};

use crate::bot_config::SyncSpec;
use crate::github::RepositoryApi;
use crate::RepositoryName;

/// Outcome of one sync attempt.
#[derive(Debug)]
pub enum FileSyncResult {
    /// The target did not exist and was created.
    Created { commit_sha: String },
    /// The target existed and was overwritten.
    Updated { commit_sha: String },
    /// The target already had the source content; nothing was written.
    Unchanged,
    /// The sync failed; the target was not modified by this attempt.
    Failed(SyncError),
}

impl FileSyncResult {
    /// Check whether the sync left the target matching the source.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Why a sync attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Source file {repository}:{path} not found")]
    SourceNotFound {
        repository: RepositoryName,
        path: String,
    },

    #[error("Failed to fetch source file {repository}:{path}: {source}")]
    SourceFetchFailed {
        repository: RepositoryName,
        path: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to look up target file {repository}:{path}: {source}")]
    TargetLookupFailed {
        repository: RepositoryName,
        path: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to write target file {repository}:{path}: {source}")]
    TargetWriteFailed {
        repository: RepositoryName,
        path: String,
        #[source]
        source: ApiError,
    },
}

impl SyncError {
    /// Check if a later attempt might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::SourceNotFound { .. } => false,
            Self::SourceFetchFailed { source, .. }
            | Self::TargetLookupFailed { source, .. }
            | Self::TargetWriteFailed { source, .. } => source.is_transient(),
        }
    }
}

/// Copy `spec.source_path` to `spec.target_path`.
///
/// 1. Read the source at `source_ref` (default branch when `None`).
/// 2. Look up the target to learn its blob SHA; a missing target is not an
///    error.
/// 3. Skip the write when both blobs are identical, otherwise create or
///    update the target, passing the SHA when the file exists.
pub async fn sync_file(
    api: &dyn RepositoryApi,
    spec: &SyncSpec,
    source_ref: Option<&str>,
) -> FileSyncResult {
    let result = run_sync(api, spec, source_ref).await;

    match &result {
        FileSyncResult::Created { commit_sha } | FileSyncResult::Updated { commit_sha } => {
            info!(
                source_repo = %spec.source_repo,
                target_repo = %spec.target_repo,
                path = %spec.target_path,
                commit = %commit_sha,
                "File synced"
            );
        }
        FileSyncResult::Unchanged => {
            info!(
                target_repo = %spec.target_repo,
                path = %spec.target_path,
                "Target already up to date"
            );
        }
        FileSyncResult::Failed(e) => {
            error!(
                source_repo = %spec.source_repo,
                target_repo = %spec.target_repo,
                path = %spec.target_path,
                transient = e.is_transient(),
                error = %e,
                "File sync failed"
            );
        }
    }

    result
}

/// Run every spec in order.
///
/// One failing sync never stops the others.
pub async fn sync_all(
    api: &dyn RepositoryApi,
    specs: &[&SyncSpec],
    source_ref: Option<&str>,
) -> Vec<FileSyncResult> {
    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        results.push(sync_file(api, spec, source_ref).await);
    }

    let failed = results.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        warn!(total = results.len(), failed, "Some file syncs failed");
    }

    results
}

async fn run_sync(
    api: &dyn RepositoryApi,
    spec: &SyncSpec,
    source_ref: Option<&str>,
) -> FileSyncResult {
    let source = match api
        .get_file(&spec.source_repo, &spec.source_path, source_ref)
        .await
    {
        Ok(file) => file,
        Err(ApiError::NotFound) => {
            return FileSyncResult::Failed(SyncError::SourceNotFound {
                repository: spec.source_repo.clone(),
                path: spec.source_path.clone(),
            })
        }
        Err(e) => {
            return FileSyncResult::Failed(SyncError::SourceFetchFailed {
                repository: spec.source_repo.clone(),
                path: spec.source_path.clone(),
                source: e,
            })
        }
    };

    let content = match source.decoded_content() {
        Ok(content) => content,
        Err(e) => {
            return FileSyncResult::Failed(SyncError::SourceFetchFailed {
                repository: spec.source_repo.clone(),
                path: spec.source_path.clone(),
                source: e,
            })
        }
    };

    let target_sha = match api.get_file(&spec.target_repo, &spec.target_path, None).await {
        Ok(existing) => Some(existing.sha),
        Err(ApiError::NotFound) => None,
        Err(e) => {
            return FileSyncResult::Failed(SyncError::TargetLookupFailed {
                repository: spec.target_repo.clone(),
                path: spec.target_path.clone(),
                source: e,
            })
        }
    };

    if target_sha.as_deref() == Some(source.sha.as_str()) {
        return FileSyncResult::Unchanged;
    }

    let mut request = CreateOrUpdateFileRequest::new(spec.commit_message.clone(), &content);
    if let Some(sha) = &target_sha {
        request = request.with_sha(sha.clone());
    }

    match api
        .put_file(&spec.target_repo, &spec.target_path, &request)
        .await
    {
        Ok(response) if target_sha.is_some() => FileSyncResult::Updated {
            commit_sha: response.commit.sha,
        },
        Ok(response) => FileSyncResult::Created {
            commit_sha: response.commit.sha,
        },
        Err(e) => FileSyncResult::Failed(SyncError::TargetWriteFailed {
            repository: spec.target_repo.clone(),
            path: spec.target_path.clone(),
            source: e,
        }),
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
