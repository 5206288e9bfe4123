//! Tests for the pull request handler.

use super::*;
use crate::bot_config::BotConfig;
use crate::events::{EventUser, PullRequest};
use crate::github_mocks::{
    event_installation, event_repository, ApiCall, MockConnector, MockRepositoryApi,
};

fn pull_request_event(action: &str, merged: Option<bool>) -> PullRequestEvent {
    PullRequestEvent {
        action: action.to_string(),
        number: 17,
        pull_request: PullRequest {
            number: 17,
            title: "Fix typo in setup guide".to_string(),
            user: EventUser {
                login: "octocat".to_string(),
            },
            merged,
            html_url: None,
        },
        repository: event_repository("example-org/website"),
        installation: event_installation(5),
    }
}

#[tokio::test]
async fn test_opened_posts_one_welcome_comment() {
    let connector = MockConnector::new(MockRepositoryApi::new());
    let rules = RuleSet::new(BotConfig::default());

    let outcome = handle_pull_request(&rules, &connector, &pull_request_event("opened", Some(false)))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        DispatchOutcome::Commented { issue_number: 17 }
    ));
    match connector.api.calls().as_slice() {
        [ApiCall::Comment {
            repository,
            number,
            body,
        }] => {
            assert_eq!(repository, "example-org/website");
            assert_eq!(*number, 17);
            assert!(body.contains("@octocat"));
            assert!(body.contains("example-org/website"));
        }
        other => panic!("Expected one comment, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redelivered_opened_comments_again() {
    let connector = MockConnector::new(MockRepositoryApi::new());
    let rules = RuleSet::new(BotConfig::default());
    let event = pull_request_event("opened", None);

    handle_pull_request(&rules, &connector, &event).await.unwrap();
    handle_pull_request(&rules, &connector, &event).await.unwrap();

    assert_eq!(connector.api.calls().len(), 2);
    assert_eq!(connector.connection_count(), 2);
}

#[tokio::test]
async fn test_merged_close_is_logged_only() {
    let connector = MockConnector::new(MockRepositoryApi::new());
    let rules = RuleSet::new(BotConfig::default());

    let outcome = handle_pull_request(&rules, &connector, &pull_request_event("closed", Some(true)))
        .await
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::Logged));
    assert_eq!(connector.connection_count(), 0);
}

#[tokio::test]
async fn test_unmerged_close_and_other_actions_do_nothing() {
    let rules = RuleSet::new(BotConfig::default());

    for (action, merged) in [
        ("closed", Some(false)),
        ("closed", None),
        ("synchronize", None),
        ("reopened", None),
        ("edited", None),
    ] {
        let connector = MockConnector::new(MockRepositoryApi::new());

        let outcome = handle_pull_request(&rules, &connector, &pull_request_event(action, merged))
            .await
            .unwrap();

        assert!(matches!(outcome, DispatchOutcome::NoAction), "{}", action);
        assert_eq!(connector.connection_count(), 0);
    }
}

#[tokio::test]
async fn test_comment_failure_is_an_error() {
    let connector = MockConnector::new(MockRepositoryApi::failing_comments());
    let rules = RuleSet::new(BotConfig::default());

    let result =
        handle_pull_request(&rules, &connector, &pull_request_event("opened", None)).await;

    match result {
        Err(e @ DispatchError::GitHubApi { .. }) => {
            assert!(e.to_string().contains("create_comment"));
            assert!(!e.is_transient());
        }
        other => panic!("Expected GitHubApi error, got {:?}", other),
    }
}
