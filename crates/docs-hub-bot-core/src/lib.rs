//! # Docs Hub Bot Core
//!
//! Domain logic for the Docs Hub Bot: typed webhook events, the declarative
//! automation rules, the cross-repository file sync routine and the event
//! dispatcher that ties them together.
//!
//! ## Architecture
//!
//! - Handlers depend on the [`github::InstallationConnector`] and
//!   [`github::RepositoryApi`] traits, never on HTTP directly
//! - The GitHub App SDK provides the production implementations
//! - Configuration is immutable after startup and shared by `Arc`
//!
//! ## Usage
//!
//! ```rust
//! use docs_hub_bot_core::{BotConfig, RepositoryName, RuleSet};
//!
//! let rules = RuleSet::new(BotConfig::default());
//! let hub: RepositoryName = "example-org/docs-hub".parse().unwrap();
//!
//! assert_eq!(rules.syncs_for_push(&hub, "refs/heads/main").len(), 2);
//! assert_eq!(rules.labels_for_issue("Bug: crash on load", None), vec!["bug"]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod bot_config;
pub mod dispatch;
pub mod events;
pub mod github;
pub mod handlers;
pub mod rules;
pub mod sync;

#[cfg(test)]
pub(crate) mod github_mocks;

pub use bot_config::{BotConfig, ConfigError, LabelRule, SyncSpec};
pub use dispatch::{DispatchError, DispatchOutcome, EventDispatcher};
pub use events::WebhookEvent;
pub use github::{InstallationConnector, RepositoryApi};
pub use rules::RuleSet;
pub use sync::{FileSyncResult, SyncError};

// ============================================================================
// Repository Name
// ============================================================================

/// Validated `owner/name` repository identifier.
///
/// GitHub treats repository names case-insensitively; [`RepositoryName::matches`]
/// does the same while the original spelling is kept for API paths.
///
/// # Examples
///
/// ```rust
/// use docs_hub_bot_core::RepositoryName;
///
/// let repo: RepositoryName = "example-org/docs-hub".parse().unwrap();
/// assert_eq!(repo.owner(), "example-org");
/// assert_eq!(repo.name(), "docs-hub");
/// assert!(repo.matches(&"Example-Org/Docs-Hub".parse().unwrap()));
/// assert!("no-slash".parse::<RepositoryName>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryName {
    full_name: String,
    split: usize,
}

impl RepositoryName {
    /// Create a repository name with validation.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let full_name = value.into().trim().to_string();

        if full_name.is_empty() {
            return Err(ValidationError::Required {
                field: "repository".to_string(),
            });
        }

        let (owner, name) = full_name
            .split_once('/')
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "repository".to_string(),
                message: format!("'{}' is not of the form owner/name", full_name),
            })?;

        for (part, label) in [(owner, "owner"), (name, "name")] {
            if part.is_empty() {
                return Err(ValidationError::InvalidFormat {
                    field: "repository".to_string(),
                    message: format!("'{}' has an empty {}", full_name, label),
                });
            }
            if !part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(ValidationError::InvalidFormat {
                    field: "repository".to_string(),
                    message: format!("'{}' contains invalid characters", full_name),
                });
            }
        }

        let split = owner.len();
        Ok(Self { full_name, split })
    }

    /// Build from parts that are known to be valid.
    pub(crate) fn from_parts(owner: &str, name: &str) -> Self {
        Self {
            full_name: format!("{}/{}", owner, name),
            split: owner.len(),
        }
    }

    /// Get the owning account.
    pub fn owner(&self) -> &str {
        &self.full_name[..self.split]
    }

    /// Get the repository name without the owner.
    pub fn name(&self) -> &str {
        &self.full_name[self.split + 1..]
    }

    /// Get the `owner/name` string.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Case-insensitive comparison, the way GitHub resolves names.
    pub fn matches(&self, other: &RepositoryName) -> bool {
        self.full_name.eq_ignore_ascii_case(&other.full_name)
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

impl FromStr for RepositoryName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RepositoryName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepositoryName> for String {
    fn from(value: RepositoryName) -> Self {
        value.full_name
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Validation errors for domain values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' has invalid format: {message}")]
    InvalidFormat { field: String, message: String },
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
