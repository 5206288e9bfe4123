//! Service configuration loading.
//!
//! Sources are applied in order, later sources overriding earlier ones:
//!  1. `/etc/docs-hub-bot/service.yaml`  (system-wide defaults, optional)
//!  2. `./config/service.yaml`           (deployment-local override, optional)
//!  3. the file named by `DHB_CONFIG_FILE` (required when set)
//!  4. environment variables prefixed `DHB__` with a `__` separator,
//!     e.g. `DHB__SERVER__PORT=9090` sets `server.port`
//!  5. the flat variables `APP_ID`, `PRIVATE_KEY_PATH`, `WEBHOOK_SECRET`,
//!     `PORT` and `GITHUB_API_URL`
//!
//! Every non-credential field has a default, so an empty environment only
//! fails validation on the missing credentials.

use config::{Config, Environment, File, FileFormat};
use docs_hub_bot_api::{ConfigError, ServiceConfig};
use std::collections::HashMap;
use tracing::info;

/// System-wide configuration file, without extension.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/docs-hub-bot/service";

/// Deployment-local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "config/service";

/// Variable naming an operator-specified configuration file.
pub const CONFIG_FILE_VAR: &str = "DHB_CONFIG_FILE";

/// Prefix for structured environment overrides.
pub const ENV_PREFIX: &str = "DHB";

/// Flat variables and the configuration keys they set.
const FLAT_VARS: [(&str, &str); 5] = [
    ("APP_ID", "github.app_id"),
    ("PRIVATE_KEY_PATH", "github.private_key_path"),
    ("WEBHOOK_SECRET", "github.webhook_secret"),
    ("PORT", "server.port"),
    ("GITHUB_API_URL", "github.api_url"),
];

/// Load and validate configuration from the default files and the process
/// environment.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    let vars: HashMap<String, String> = std::env::vars().collect();
    load(&[SYSTEM_CONFIG_FILE, LOCAL_CONFIG_FILE], &vars)
}

/// Load and validate configuration from `default_files` and `vars`.
///
/// # Errors
///
/// Returns `ConfigError::Parsing` when a source cannot be read or a value
/// has the wrong type, and the validation error otherwise.
pub fn load(
    default_files: &[&str],
    vars: &HashMap<String, String>,
) -> Result<ServiceConfig, ConfigError> {
    let mut builder = Config::builder();

    for name in default_files {
        builder = builder.add_source(
            File::with_name(name)
                .required(false)
                .format(FileFormat::Yaml),
        );
    }

    if let Some(path) = vars.get(CONFIG_FILE_VAR).filter(|p| !p.is_empty()) {
        info!(path = %path, "Loading configuration from explicit path");
        builder = builder.add_source(
            File::with_name(path)
                .required(true)
                .format(FileFormat::Yaml),
        );
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(vars.clone())),
    );

    for (var, key) in FLAT_VARS {
        let value = vars.get(var).filter(|v| !v.is_empty()).cloned();
        builder = builder
            .set_override_option(key, value)
            .map_err(parsing_error)?;
    }

    let config: ServiceConfig = builder
        .build()
        .map_err(parsing_error)?
        .try_deserialize()
        .map_err(parsing_error)?;

    config.validate()?;
    Ok(config)
}

fn parsing_error(e: config::ConfigError) -> ConfigError {
    ConfigError::Parsing {
        message: e.to_string(),
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
