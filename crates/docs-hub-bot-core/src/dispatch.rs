//! Event dispatch.
//!
//! The dispatcher turns a verified delivery into a typed [`WebhookEvent`] and
//! runs exactly one handler for it. It owns no mutable state; one instance is
//! shared by every request.

use github_app_sdk::{ApiError, InstallationId};
use std::sync::Arc;
use tracing::{error, info, instrument, Span};

use crate::events::WebhookEvent;
use crate::github::InstallationConnector;
use crate::handlers;
use crate::rules::RuleSet;
use crate::sync::FileSyncResult;

// ============================================================================
// Outcomes and Errors
// ============================================================================

/// What a handler did with an event.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Files were synced; individual failures are inside the results.
    Synced(Vec<FileSyncResult>),
    /// A welcome comment was posted.
    Commented { issue_number: u64 },
    /// Labels were added to an issue.
    Labeled {
        issue_number: u64,
        labels: Vec<String>,
    },
    /// The event was recorded in the logs only.
    Logged,
    /// A handler ran but no rule applied.
    NoAction,
    /// No handler exists for this event type.
    Ignored { event_type: String },
}

/// Handler failures. Every variant becomes an HTTP 500.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Malformed {event_type} payload: {message}")]
    MalformedPayload { event_type: String, message: String },

    #[error("Missing X-GitHub-Event header")]
    MissingEventType,

    #[error("The {event_type} event carries no installation")]
    MissingInstallation { event_type: String },

    #[error("Failed to open installation {installation_id}: {source}")]
    Installation {
        installation_id: InstallationId,
        #[source]
        source: ApiError,
    },

    #[error("GitHub API call '{operation}' failed: {source}")]
    GitHubApi {
        operation: String,
        #[source]
        source: ApiError,
    },
}

impl DispatchError {
    /// Check if a redelivery of the same event might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::MalformedPayload { .. } => false,
            Self::MissingEventType => false,
            Self::MissingInstallation { .. } => false,
            Self::Installation { source, .. } | Self::GitHubApi { source, .. } => {
                source.is_transient()
            }
        }
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Routes verified deliveries to the handler for their event type.
pub struct EventDispatcher {
    rules: Arc<RuleSet>,
    connector: Arc<dyn InstallationConnector>,
}

impl EventDispatcher {
    /// Create a dispatcher over a rule table and an installation connector.
    pub fn new(rules: RuleSet, connector: Arc<dyn InstallationConnector>) -> Self {
        Self {
            rules: Arc::new(rules),
            connector,
        }
    }

    /// Parse and handle one delivery.
    ///
    /// `payload` must be the raw request body that was signature checked.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` when the event header is missing, the payload
    /// does not match its event schema, or the handler fails. Unsupported
    /// event types are not errors.
    #[instrument(skip_all, fields(
        event_type = event_type.unwrap_or("<missing>"),
        delivery_id = delivery_id.unwrap_or("-"),
        repository = tracing::field::Empty,
    ))]
    pub async fn dispatch(
        &self,
        event_type: Option<&str>,
        delivery_id: Option<&str>,
        payload: &[u8],
    ) -> Result<DispatchOutcome, DispatchError> {
        let result = self.parse_and_handle(event_type, payload).await;

        if let Err(e) = &result {
            error!(error = %e, transient = e.is_transient(), "Event processing failed");
        }
        result
    }

    async fn parse_and_handle(
        &self,
        event_type: Option<&str>,
        payload: &[u8],
    ) -> Result<DispatchOutcome, DispatchError> {
        let event_type = event_type.ok_or(DispatchError::MissingEventType)?;
        let event = WebhookEvent::parse(event_type, payload)?;

        if let Some(repository) = event.repository() {
            Span::current().record("repository", repository.full_name());
        }

        self.handle(event).await
    }

    /// Run the handler for an already parsed event.
    pub async fn handle(&self, event: WebhookEvent) -> Result<DispatchOutcome, DispatchError> {
        let connector = self.connector.as_ref();

        match event {
            WebhookEvent::Push(e) => handlers::handle_push(&self.rules, connector, &e).await,
            WebhookEvent::PullRequest(e) => {
                handlers::handle_pull_request(&self.rules, connector, &e).await
            }
            WebhookEvent::Issues(e) => handlers::handle_issues(&self.rules, connector, &e).await,
            WebhookEvent::Release(e) => Ok(handlers::handle_release(&e)),
            WebhookEvent::Other { event_type } => {
                info!(event_type = %event_type, "Ignoring unhandled event type");
                Ok(DispatchOutcome::Ignored { event_type })
            }
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
