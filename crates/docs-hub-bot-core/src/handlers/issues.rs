//! `issues` handler: keyword labelling.

use tracing::{debug, info, instrument};

use super::connect;
use crate::dispatch::{DispatchError, DispatchOutcome};
use crate::events::IssuesEvent;
use crate::github::InstallationConnector;
use crate::rules::RuleSet;

/// Label newly opened issues from keywords in their title and body.
///
/// No token is requested when no keyword matches.
#[instrument(skip_all, fields(
    repository = %event.repository.full_name,
    number = event.issue.number,
    action = %event.action,
))]
pub async fn handle_issues(
    rules: &RuleSet,
    connector: &dyn InstallationConnector,
    event: &IssuesEvent,
) -> Result<DispatchOutcome, DispatchError> {
    if event.action != "opened" {
        debug!("No rule for issue action");
        return Ok(DispatchOutcome::NoAction);
    }

    let issue = &event.issue;
    let labels = rules.labels_for_issue(&issue.title, issue.body.as_deref());
    if labels.is_empty() {
        debug!("Issue matches no label keywords");
        return Ok(DispatchOutcome::NoAction);
    }

    let repository = &event.repository.full_name;
    let api = connect(connector, event.installation, "issues").await?;
    api.add_labels(repository, issue.number, &labels)
        .await
        .map_err(|source| DispatchError::GitHubApi {
            operation: "add_labels".to_string(),
            source,
        })?;

    info!(labels = ?labels, "Labelled issue");
    Ok(DispatchOutcome::Labeled {
        issue_number: issue.number,
        labels,
    })
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
