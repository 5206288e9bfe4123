//! Per-event handlers.
//!
//! Each handler receives a parsed event and the rule table. Installation
//! tokens are requested only once a rule has decided that GitHub must be
//! called, and at most once per delivery.

use std::sync::Arc;
use tracing::debug;

use crate::dispatch::DispatchError;
use crate::events::EventInstallation;
use crate::github::{InstallationConnector, RepositoryApi};

mod issues;
mod pull_request;
mod push;
mod release;

pub use issues::handle_issues;
pub use pull_request::handle_pull_request;
pub use push::handle_push;
pub use release::handle_release;

/// Open an installation session for an event.
pub(crate) async fn connect(
    connector: &dyn InstallationConnector,
    installation: Option<EventInstallation>,
    event_type: &str,
) -> Result<Arc<dyn RepositoryApi>, DispatchError> {
    let installation_id = installation
        .map(|i| i.id)
        .ok_or_else(|| DispatchError::MissingInstallation {
            event_type: event_type.to_string(),
        })?;

    debug!(installation_id = %installation_id, "Requesting installation token");

    connector
        .connect(installation_id)
        .await
        .map_err(|source| DispatchError::Installation {
            installation_id,
            source,
        })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
