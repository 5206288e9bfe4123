//! `pull_request` handler: welcome comments and merge logging.

use tracing::{debug, info, instrument};

use super::connect;
use crate::dispatch::{DispatchError, DispatchOutcome};
use crate::events::PullRequestEvent;
use crate::github::InstallationConnector;
use crate::rules::RuleSet;

/// Comment on newly opened pull requests and log merges.
///
/// Redelivered `opened` events are not deduplicated and comment again.
#[instrument(skip_all, fields(
    repository = %event.repository.full_name,
    number = event.number,
    action = %event.action,
))]
pub async fn handle_pull_request(
    rules: &RuleSet,
    connector: &dyn InstallationConnector,
    event: &PullRequestEvent,
) -> Result<DispatchOutcome, DispatchError> {
    let repository = &event.repository.full_name;
    let pr = &event.pull_request;

    match event.action.as_str() {
        "opened" => {
            let api = connect(connector, event.installation, "pull_request").await?;
            let body = rules.welcome_message(repository, event.number, &pr.user.login);

            api.create_comment(repository, event.number, &body)
                .await
                .map_err(|source| DispatchError::GitHubApi {
                    operation: "create_comment".to_string(),
                    source,
                })?;

            info!(author = %pr.user.login, "Posted welcome comment");
            Ok(DispatchOutcome::Commented {
                issue_number: event.number,
            })
        }
        "closed" if pr.merged == Some(true) => {
            info!(title = %pr.title, author = %pr.user.login, "Pull request merged");
            Ok(DispatchOutcome::Logged)
        }
        _ => {
            debug!("No rule for pull request action");
            Ok(DispatchOutcome::NoAction)
        }
    }
}

#[cfg(test)]
#[path = "pull_request_tests.rs"]
mod tests;
