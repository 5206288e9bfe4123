//! `release` handler.

use tracing::{debug, info};

use crate::dispatch::DispatchOutcome;
use crate::events::ReleaseEvent;

/// Log published releases. No GitHub calls are made.
pub fn handle_release(event: &ReleaseEvent) -> DispatchOutcome {
    if event.action != "published" {
        debug!(action = %event.action, "No rule for release action");
        return DispatchOutcome::NoAction;
    }

    info!(
        repository = %event.repository.full_name,
        tag = %event.release.tag_name,
        name = event.release.name.as_deref().unwrap_or(""),
        prerelease = event.release.prerelease,
        "Release published"
    );
    DispatchOutcome::Logged
}
