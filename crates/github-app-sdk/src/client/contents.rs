//! Repository contents operations.
//!
//! Wraps `GET` and `PUT /repos/{owner}/{repo}/contents/{path}`, the two calls
//! needed to copy a file from one repository into another.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::client::InstallationClient;
use crate::error::ApiError;

/// A file as returned by the contents API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileContent {
    /// Path of the file within the repository
    pub path: String,

    /// Git blob SHA of the file; required to update it
    pub sha: String,

    /// File size in bytes
    #[serde(default)]
    pub size: u64,

    /// Encoded content (absent in write responses)
    #[serde(default)]
    pub content: Option<String>,

    /// Content encoding, normally `base64`
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContent {
    /// Decode the file body.
    ///
    /// GitHub wraps base64 content at 60 columns; the line breaks are
    /// stripped before decoding.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidResponse` if the content is missing, uses an
    /// unknown encoding, or is not valid base64.
    pub fn decoded_content(&self) -> Result<Vec<u8>, ApiError> {
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| ApiError::InvalidResponse {
                message: format!("No content returned for '{}'", self.path),
            })?;

        match self.encoding.as_deref() {
            Some("base64") | None => {}
            Some(other) => {
                return Err(ApiError::InvalidResponse {
                    message: format!("Unsupported content encoding '{}'", other),
                })
            }
        }

        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| ApiError::InvalidResponse {
                message: format!("Invalid base64 content for '{}': {}", self.path, e),
            })
    }
}

/// Request body for creating or updating a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrUpdateFileRequest {
    /// Commit message
    pub message: String,

    /// Base64-encoded file content
    pub content: String,

    /// Blob SHA of the file being replaced; omitted when creating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

}

impl CreateOrUpdateFileRequest {
    /// Build a request from raw file bytes.
    pub fn new(message: impl Into<String>, content: &[u8]) -> Self {
        Self {
            message: message.into(),
            content: base64::engine::general_purpose::STANDARD.encode(content),
            sha: None,
        }
    }

    /// Replace an existing file with the given blob SHA.
    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }
}

/// Commit created by a contents write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileCommit {
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Response of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileUpdateResponse {
    #[serde(default)]
    pub content: Option<FileContent>,
    pub commit: FileCommit,
}

impl InstallationClient {
    /// Fetch a file from a repository.
    ///
    /// `git_ref` selects a branch, tag or commit; `None` reads the default
    /// branch.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the file does not exist at that ref.
    pub async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<FileContent, ApiError> {
        let mut api_path = contents_path(owner, repo, path);
        if let Some(git_ref) = git_ref {
            api_path.push_str("?ref=");
            api_path.push_str(&urlencoding::encode(git_ref));
        }

        let response = self.get(&api_path).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let value: serde_json::Value = response.json().await?;
        if value.is_array() {
            return Err(ApiError::InvalidResponse {
                message: format!("'{}' is a directory", path),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Create a file, or replace it when `request.sha` is set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` or `ApiError::InvalidRequest` when the
    /// supplied SHA does not match the current file.
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &CreateOrUpdateFileRequest,
    ) -> Result<FileUpdateResponse, ApiError> {
        let api_path = contents_path(owner, repo, path);
        let response = self.put(&api_path, request).await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        Ok(response.json().await?)
    }
}

/// API path of a file, with each path segment percent-encoded.
///
/// `/` stays a separator; `?`, `#` and `%` inside a segment cannot change
/// which file is addressed.
fn contents_path(owner: &str, repo: &str, path: &str) -> String {
    let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
    format!(
        "/repos/{}/{}/contents/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo),
        encoded.join("/")
    )
}

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;
