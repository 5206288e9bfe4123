//! # Docs Hub Bot Service
//!
//! Binary entry point for the Docs Hub Bot HTTP service.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes logging
//! - Loads the GitHub App private key and builds the GitHub client
//! - Resolves the app identity and starts the HTTP server from docs-hub-bot-api

mod settings;

use anyhow::Context;
use docs_hub_bot_api::{
    start_server, AppIdentity, AppState, ConfigError, LoggingConfig, ServiceConfig, ServiceError,
};
use docs_hub_bot_core::{EventDispatcher, RuleSet};
use github_app_sdk::auth::{AuthConfig, GitHubAppAuth};
use github_app_sdk::{ClientConfig, GitHubAppId, GitHubClient, PrivateKey};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported by the health check when `GET /app` fails.
const UNKNOWN_APP_NAME: &str = "unknown";

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so load it first and report any
    // failure once logging is up.
    let loaded = settings::load_from_env();
    let default_logging = LoggingConfig::default();
    init_logging(loaded.as_ref().map(|c| &c.logging).unwrap_or(&default_logging));

    info!("Starting Docs Hub Bot Service");

    let service_config = match loaded {
        Ok(config) => config,
        Err(e) => exit_with(ServiceError::from(e)),
    };

    let client = match build_client(&service_config) {
        Ok(client) => client,
        Err(e) => exit_with(credential_error(&e)),
    };

    let identity = resolve_identity(&client, service_config.github.app_id).await;

    info!(
        host = %service_config.server.host,
        port = service_config.server.port,
        webhook_path = %service_config.server.webhook_path,
        hub_repository = %service_config.bot.hub_repository,
        "Starting HTTP server"
    );

    let rules = RuleSet::new(service_config.bot.clone());
    let dispatcher = Arc::new(EventDispatcher::new(rules, Arc::new(client)));
    let state = AppState::new(service_config, dispatcher, identity);

    if let Err(e) = start_server(state).await {
        exit_with(e);
    }
}

// ============================================================================
// Private helpers
// ============================================================================

fn exit_with(e: ServiceError) -> ! {
    error!(error = %e, exit_code = e.exit_code(), "Docs Hub Bot Service terminated");
    std::process::exit(e.exit_code());
}

/// Credential loading failures are reported as configuration errors.
fn credential_error(e: &anyhow::Error) -> ServiceError {
    ServiceError::Configuration(ConfigError::Invalid {
        message: format!("{:#}", e),
    })
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&logging.level)));

    let json = logging.json_format;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Expand a bare level into per-crate directives; full directives pass through.
fn default_directives(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!(
        "docs_hub_bot_service={level},docs_hub_bot_api={level},docs_hub_bot_core={level},tower_http=debug",
        level = level
    )
}

/// Load the private key and build the app-authenticated client.
fn build_client(config: &ServiceConfig) -> anyhow::Result<GitHubClient> {
    let github = &config.github;

    let private_key = PrivateKey::from_pem_file(&github.private_key_path).with_context(|| {
        format!("failed to load private key from '{}'", github.private_key_path)
    })?;

    let auth_config = AuthConfig {
        github_api_url: github.api_url.clone(),
        user_agent: github.user_agent.clone(),
        timeout: github.request_timeout(),
        ..AuthConfig::default()
    };
    let auth = GitHubAppAuth::new(GitHubAppId::new(github.app_id), private_key, auth_config)
        .context("failed to build GitHub App authentication")?;

    let client_config = ClientConfig::default()
        .with_user_agent(github.user_agent.clone())
        .with_timeout(github.request_timeout())
        .with_github_api_url(github.api_url.clone());

    GitHubClient::builder(auth)
        .config(client_config)
        .build()
        .context("failed to build GitHub client")
}

/// Resolve the app name and log the installation count.
///
/// Neither call is fatal: the service still accepts webhooks when GitHub is
/// unreachable at startup.
async fn resolve_identity(client: &GitHubClient, app_id: u64) -> AppIdentity {
    let name = match client.get_app().await {
        Ok(app) => {
            info!(app = %app.name, app_id = app.id, "Authenticated as GitHub App");
            app.name
        }
        Err(e) => {
            warn!(error = %e, "Could not resolve GitHub App identity");
            UNKNOWN_APP_NAME.to_string()
        }
    };

    match client.list_installations().await {
        Ok(installations) => info!(count = installations.len(), "GitHub App installations"),
        Err(e) => warn!(error = %e, "Could not list GitHub App installations"),
    }

    AppIdentity { name, id: app_id }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
