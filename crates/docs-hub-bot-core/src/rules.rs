//! Declarative automation rules.
//!
//! `RuleSet` answers the three questions the handlers ask: which files to
//! sync for a push, which labels an issue gets, and what the welcome comment
//! says. It is pure data and needs no GitHub access.

use crate::bot_config::{BotConfig, SyncSpec};
use crate::RepositoryName;

/// Compiled form of a [`BotConfig`].
#[derive(Debug, Clone)]
pub struct RuleSet {
    config: BotConfig,
    /// Lower-cased keywords per label, in rule order.
    label_keywords: Vec<(String, Vec<String>)>,
}

impl RuleSet {
    /// Compile rules from a validated configuration.
    pub fn new(config: BotConfig) -> Self {
        let label_keywords = config
            .label_rules
            .iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (rule.label.clone(), keywords)
            })
            .collect();

        Self {
            config,
            label_keywords,
        }
    }

    /// Get the configuration these rules were compiled from.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Get the branch ref that triggers file sync.
    pub fn hub_ref(&self) -> String {
        format!("refs/heads/{}", self.config.hub_branch)
    }

    /// Sync specs triggered by a push of `git_ref` to `repository`.
    ///
    /// Only a push to the hub branch of the hub repository fires; every other
    /// repository, branch or tag yields an empty list.
    pub fn syncs_for_push(&self, repository: &RepositoryName, git_ref: &str) -> Vec<&SyncSpec> {
        if git_ref != self.hub_ref() || !repository.matches(&self.config.hub_repository) {
            return Vec::new();
        }

        self.config
            .sync
            .iter()
            .filter(|spec| spec.source_repo.matches(&self.config.hub_repository))
            .collect()
    }

    /// Labels for a newly opened issue.
    ///
    /// Keywords match as case-insensitive substrings of the title and body.
    /// Labels are returned in rule order without duplicates.
    pub fn labels_for_issue(&self, title: &str, body: Option<&str>) -> Vec<String> {
        let text = format!("{}\n{}", title, body.unwrap_or_default()).to_lowercase();

        let mut labels: Vec<String> = Vec::new();
        for (label, keywords) in &self.label_keywords {
            if labels.contains(label) {
                continue;
            }
            if keywords.iter().any(|keyword| text.contains(keyword.as_str())) {
                labels.push(label.clone());
            }
        }
        labels
    }

    /// Render the pull request welcome comment.
    pub fn welcome_message(&self, repository: &RepositoryName, number: u64, author: &str) -> String {
        self.config
            .welcome_template
            .replace("{repository}", repository.full_name())
            .replace("{number}", &number.to_string())
            .replace("{author}", author)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
