//! # Bot Configuration Module
//!
//! Declares what the bot automates: which hub repository fans out which files
//! to which targets, which keywords map to which issue labels, and the text
//! of the pull request welcome comment.
//!
//! The configuration is immutable after loading and validation.

use serde::{Deserialize, Serialize};

use crate::RepositoryName;

// ============================================================================
// Core Configuration Types
// ============================================================================

/// Complete automation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Repository whose pushes trigger file sync
    pub hub_repository: RepositoryName,

    /// Branch of the hub repository that triggers file sync
    pub hub_branch: String,

    /// Files copied from the hub to downstream repositories
    pub sync: Vec<SyncSpec>,

    /// Keyword groups used to label newly opened issues, in priority order
    pub label_rules: Vec<LabelRule>,

    /// Comment posted on newly opened pull requests.
    ///
    /// `{repository}`, `{number}` and `{author}` are substituted.
    pub welcome_template: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        let hub = RepositoryName::from_parts("example-org", "docs-hub");
        Self {
            hub_repository: hub.clone(),
            hub_branch: "main".to_string(),
            sync: vec![
                SyncSpec {
                    source_repo: hub.clone(),
                    source_path: "README.md".to_string(),
                    target_repo: RepositoryName::from_parts("example-org", "website"),
                    target_path: "docs/README.md".to_string(),
                    commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
                },
                SyncSpec {
                    source_repo: hub,
                    source_path: "README.md".to_string(),
                    target_repo: RepositoryName::from_parts("example-org", "handbook"),
                    target_path: "README.md".to_string(),
                    commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
                },
            ],
            label_rules: vec![
                LabelRule::new("documentation", &["doc", "documentation"]),
                LabelRule::new("bug", &["bug", "error"]),
                LabelRule::new("enhancement", &["feature", "enhancement"]),
            ],
            welcome_template: DEFAULT_WELCOME_TEMPLATE.to_string(),
        }
    }
}

const DEFAULT_COMMIT_MESSAGE: &str = "docs: sync README.md from docs hub";

const DEFAULT_WELCOME_TEMPLATE: &str = "👋 Thanks for opening pull request #{number} in {repository}, @{author}!\n\n\
A maintainer will review it soon. Documentation changes should be made in the docs hub; \
README files in downstream repositories are overwritten on every sync.";

impl BotConfig {
    /// Validate configuration values.
    ///
    /// Repository names are validated when they are deserialized; this checks
    /// the remaining fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub_branch.trim().is_empty() {
            return Err(ConfigError::invalid("hub_branch", "must not be empty"));
        }

        for (index, spec) in self.sync.iter().enumerate() {
            spec.validate()
                .map_err(|message| ConfigError::invalid(&format!("sync[{}]", index), &message))?;
        }

        for (index, rule) in self.label_rules.iter().enumerate() {
            let field = format!("label_rules[{}]", index);
            if rule.label.trim().is_empty() {
                return Err(ConfigError::invalid(&field, "label must not be empty"));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    &field,
                    "at least one non-empty keyword is required",
                ));
            }
        }

        if self.welcome_template.trim().is_empty() {
            return Err(ConfigError::invalid("welcome_template", "must not be empty"));
        }

        Ok(())
    }
}

/// One file copied from a source repository to a target repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSpec {
    pub source_repo: RepositoryName,
    pub source_path: String,
    pub target_repo: RepositoryName,
    pub target_path: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

impl SyncSpec {
    fn validate(&self) -> Result<(), String> {
        for (value, name) in [
            (&self.source_path, "source_path"),
            (&self.target_path, "target_path"),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
            if value.starts_with('/') {
                return Err(format!("{} must be relative to the repository root", name));
            }
        }
        if self.commit_message.trim().is_empty() {
            return Err("commit_message must not be empty".to_string());
        }
        if self.source_repo.matches(&self.target_repo) && self.source_path == self.target_path {
            return Err("source and target are the same file".to_string());
        }
        Ok(())
    }
}

/// Maps a group of keywords to an issue label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl LabelRule {
    /// Create a rule from a label and its keywords.
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors reported by `BotConfig::validate`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: &str) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "bot_config_tests.rs"]
mod tests;
