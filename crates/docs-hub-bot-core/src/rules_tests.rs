//! Tests for the automation rule table.

use super::*;
use crate::bot_config::LabelRule;

fn rules() -> RuleSet {
    RuleSet::new(BotConfig::default())
}

fn repo(value: &str) -> RepositoryName {
    value.parse().unwrap()
}

// ============================================================================
// Push Rules
// ============================================================================

mod push_rule_tests {
    use super::*;

    #[test]
    fn test_push_to_hub_main_selects_both_targets() {
        let rules = rules();
        let specs = rules.syncs_for_push(&repo("example-org/docs-hub"), "refs/heads/main");

        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|s| s.source_path == "README.md"));
    }

    #[test]
    fn test_hub_match_is_case_insensitive() {
        let rules = rules();
        let specs = rules.syncs_for_push(&repo("Example-Org/Docs-Hub"), "refs/heads/main");

        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_push_to_other_branch_selects_nothing() {
        let rules = rules();

        for git_ref in ["refs/heads/develop", "refs/heads/main-backup", "refs/tags/main", "main"] {
            assert!(
                rules
                    .syncs_for_push(&repo("example-org/docs-hub"), git_ref)
                    .is_empty(),
                "{} should not trigger a sync",
                git_ref
            );
        }
    }

    #[test]
    fn test_push_to_other_repository_selects_nothing() {
        let rules = rules();

        assert!(rules
            .syncs_for_push(&repo("example-org/website"), "refs/heads/main")
            .is_empty());
    }

    #[test]
    fn test_specs_from_other_sources_are_skipped() {
        let mut config = BotConfig::default();
        config.sync[0].source_repo = repo("example-org/elsewhere");
        let rules = RuleSet::new(config);

        let specs = rules.syncs_for_push(&repo("example-org/docs-hub"), "refs/heads/main");

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].target_repo.full_name(), "example-org/handbook");
    }

    #[test]
    fn test_hub_ref_uses_configured_branch() {
        let config = BotConfig {
            hub_branch: "release".to_string(),
            ..BotConfig::default()
        };

        assert_eq!(RuleSet::new(config).hub_ref(), "refs/heads/release");
    }

    #[test]
    fn test_configured_hub_branch_triggers_sync() {
        let rules = RuleSet::new(BotConfig {
            hub_branch: "release".to_string(),
            ..BotConfig::default()
        });
        let hub = repo("example-org/docs-hub");

        assert_eq!(rules.syncs_for_push(&hub, "refs/heads/release").len(), 2);
        assert!(rules.syncs_for_push(&hub, "refs/heads/main").is_empty());
    }
}

// ============================================================================
// Label Rules
// ============================================================================

mod label_rule_tests {
    use super::*;

    #[test]
    fn test_bug_title_gets_bug_label() {
        assert_eq!(rules().labels_for_issue("Bug: crash on load", None), vec!["bug"]);
    }

    #[test]
    fn test_docs_title_and_documentation_body() {
        assert_eq!(
            rules().labels_for_issue("Add docs", Some("please add documentation")),
            vec!["documentation"]
        );
    }

    #[test]
    fn test_no_keywords_gives_no_labels() {
        assert!(rules()
            .labels_for_issue("Question about licensing", Some("Is MIT ok?"))
            .is_empty());
    }

    #[test]
    fn test_multiple_groups_match_in_rule_order() {
        let labels = rules().labels_for_issue(
            "Feature request",
            Some("The docs page throws an ERROR when I click it"),
        );

        assert_eq!(labels, vec!["documentation", "bug", "enhancement"]);
    }

    #[test]
    fn test_keywords_match_as_substrings() {
        // "error" inside "errors", "doc" inside "docker"
        assert_eq!(
            rules().labels_for_issue("Docker build errors", None),
            vec!["documentation", "bug"]
        );
    }

    #[test]
    fn test_null_body_matches_like_empty_body() {
        let rules = rules();
        assert_eq!(
            rules.labels_for_issue("Enhancement", None),
            rules.labels_for_issue("Enhancement", Some(""))
        );
    }

    #[test]
    fn test_duplicate_labels_are_collapsed() {
        let mut config = BotConfig::default();
        config.label_rules.push(LabelRule::new("bug", &["crash"]));
        let rules = RuleSet::new(config);

        assert_eq!(rules.labels_for_issue("bug: crash", None), vec!["bug"]);
    }

    #[test]
    fn test_configured_keywords_are_case_insensitive() {
        let config = BotConfig {
            label_rules: vec![LabelRule::new("question", &["How Do I"])],
            ..BotConfig::default()
        };

        assert_eq!(
            RuleSet::new(config).labels_for_issue("how do i configure this?", None),
            vec!["question"]
        );
    }
}

// ============================================================================
// Welcome Message
// ============================================================================

#[test]
fn test_welcome_message_renders_repository_context() {
    let message = rules().welcome_message(&repo("example-org/website"), 12, "contributor");

    assert!(message.contains("#12"));
    assert!(message.contains("example-org/website"));
    assert!(message.contains("@contributor"));
    assert!(!message.contains('{'));
}
