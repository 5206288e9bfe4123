//! Issue comment and label operations.
//!
//! Pull requests share the issue number space, so these calls serve both.

use serde::{Deserialize, Serialize};

use crate::client::InstallationClient;
use crate::error::ApiError;

/// User associated with an issue or comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueUser {
    /// User login name
    pub login: String,

    /// User ID
    pub id: u64,

    /// User type
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
}

/// GitHub label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    /// Unique label identifier
    pub id: u64,

    /// Label name
    pub name: String,

    /// Label color (6-digit hex code without #)
    #[serde(default)]
    pub color: Option<String>,

    /// Label description
    #[serde(default)]
    pub description: Option<String>,
}

/// Comment on an issue or pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Unique comment identifier
    pub id: u64,

    /// Comment body (Markdown)
    pub body: String,

    /// Comment author
    #[serde(default)]
    pub user: Option<IssueUser>,

    /// Comment URL
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Request to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCommentRequest {
    /// Comment body (Markdown)
    pub body: String,
}

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

impl InstallationClient {
    /// Post a comment on an issue or pull request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the issue does not exist and
    /// `ApiError::AuthorizationFailed` if the installation may not write.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: impl Into<String>,
    ) -> Result<Comment, ApiError> {
        let path = format!(
            "/repos/{}/{}/issues/{}/comments",
            owner, repo, issue_number
        );
        let request = CreateCommentRequest { body: body.into() };
        let response = self.post(&path, &request).await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// Add labels to an issue or pull request.
    ///
    /// Labels that do not exist yet are created by GitHub. Returns the full
    /// label set of the issue after the call.
    pub async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>, ApiError> {
        let path = format!("/repos/{}/{}/issues/{}/labels", owner, repo, issue_number);
        let response = self.post(&path, &AddLabelsRequest { labels }).await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
