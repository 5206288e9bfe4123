//! Typed GitHub webhook events.
//!
//! Each supported event type has an explicit payload schema containing only
//! the fields the bot reads. Payloads are deserialized once at the boundary;
//! anything that does not match is rejected before a handler runs.

use github_app_sdk::InstallationId;
use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchError;
use crate::RepositoryName;

// ============================================================================
// Event Envelope
// ============================================================================

/// A verified webhook delivery, keyed by the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    Push(PushEvent),
    PullRequest(PullRequestEvent),
    Issues(IssuesEvent),
    Release(ReleaseEvent),
    /// An event type the bot has no handler for.
    Other { event_type: String },
}

impl WebhookEvent {
    /// Deserialize a payload into the variant selected by `event_type`.
    ///
    /// Unsupported event types are not parsed at all.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedPayload` when the body does not match
    /// the schema of a supported event.
    pub fn parse(event_type: &str, payload: &[u8]) -> Result<Self, DispatchError> {
        fn decode<T: for<'de> Deserialize<'de>>(
            event_type: &str,
            payload: &[u8],
        ) -> Result<T, DispatchError> {
            serde_json::from_slice(payload).map_err(|e| DispatchError::MalformedPayload {
                event_type: event_type.to_string(),
                message: e.to_string(),
            })
        }

        Ok(match event_type {
            "push" => Self::Push(decode(event_type, payload)?),
            "pull_request" => Self::PullRequest(decode(event_type, payload)?),
            "issues" => Self::Issues(decode(event_type, payload)?),
            "release" => Self::Release(decode(event_type, payload)?),
            other => Self::Other {
                event_type: other.to_string(),
            },
        })
    }

    /// Get the `X-GitHub-Event` value this event was parsed from.
    pub fn event_type(&self) -> &str {
        match self {
            Self::Push(_) => "push",
            Self::PullRequest(_) => "pull_request",
            Self::Issues(_) => "issues",
            Self::Release(_) => "release",
            Self::Other { event_type } => event_type,
        }
    }

    /// Get the repository the event was delivered for.
    pub fn repository(&self) -> Option<&RepositoryName> {
        match self {
            Self::Push(e) => Some(&e.repository.full_name),
            Self::PullRequest(e) => Some(&e.repository.full_name),
            Self::Issues(e) => Some(&e.repository.full_name),
            Self::Release(e) => Some(&e.repository.full_name),
            Self::Other { .. } => None,
        }
    }
}

// ============================================================================
// Shared Payload Types
// ============================================================================

/// Repository block present in every repository-scoped event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepository {
    pub full_name: RepositoryName,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Installation block present when the event is delivered to a GitHub App.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstallation {
    pub id: InstallationId,
}

/// User reference (`sender`, `user`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUser {
    pub login: String,
}

// ============================================================================
// push
// ============================================================================

/// `push` event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    pub repository: EventRepository,
    #[serde(default)]
    pub installation: Option<EventInstallation>,
}

impl PushEvent {
    /// Branch name, or `None` when the ref is not a branch (e.g. a tag).
    pub fn branch(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/heads/")
    }
}

/// Commit summary within a `push` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushCommit {
    pub id: String,
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// pull_request
// ============================================================================

/// `pull_request` event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    pub pull_request: PullRequest,
    pub repository: EventRepository,
    #[serde(default)]
    pub installation: Option<EventInstallation>,
}

/// Pull request fields read by the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: EventUser,
    #[serde(default)]
    pub merged: Option<bool>,
    #[serde(default)]
    pub html_url: Option<String>,
}

// ============================================================================
// issues
// ============================================================================

/// `issues` event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    pub repository: EventRepository,
    #[serde(default)]
    pub installation: Option<EventInstallation>,
}

/// Issue fields read by the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    /// `null` when the issue was opened without a description.
    #[serde(default)]
    pub body: Option<String>,
}

// ============================================================================
// release
// ============================================================================

/// `release` event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEvent {
    pub action: String,
    pub release: Release,
    pub repository: EventRepository,
    #[serde(default)]
    pub installation: Option<EventInstallation>,
}

/// Release fields read by the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
