//! `push` handler: propagate hub files to their targets.

use tracing::{debug, info, instrument};

use super::connect;
use crate::dispatch::{DispatchError, DispatchOutcome};
use crate::events::PushEvent;
use crate::github::InstallationConnector;
use crate::rules::RuleSet;
use crate::sync::sync_all;

/// Sync every configured file when the hub branch of the hub repository moves.
///
/// Sync failures are reported inside [`DispatchOutcome::Synced`]; only a
/// missing installation or a failed token request is an error.
#[instrument(skip_all, fields(
    repository = %event.repository.full_name,
    git_ref = %event.git_ref,
))]
pub async fn handle_push(
    rules: &RuleSet,
    connector: &dyn InstallationConnector,
    event: &PushEvent,
) -> Result<DispatchOutcome, DispatchError> {
    let specs = rules.syncs_for_push(&event.repository.full_name, &event.git_ref);
    if specs.is_empty() {
        debug!("Push does not match any sync rule");
        return Ok(DispatchOutcome::NoAction);
    }

    info!(
        commits = event.commits.len(),
        files = specs.len(),
        "Hub branch updated, syncing files"
    );

    let api = connect(connector, event.installation, "push").await?;
    let results = sync_all(api.as_ref(), &specs, Some(rules.config().hub_branch.as_str())).await;

    Ok(DispatchOutcome::Synced(results))
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
