//! Tests for configuration loading.

use super::*;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const FULL_YAML: &str = r#"
server:
  port: 8080
  webhook_path: /github/webhook
github:
  app_id: 123456
  private_key_path: /run/secrets/app.pem
  webhook_secret: from-file
  request_timeout_seconds: 10
logging:
  json_format: true
bot:
  hub_repository: acme/handbook-hub
  sync:
    - source_repo: acme/handbook-hub
      source_path: README.md
      target_repo: acme/site
      target_path: content/README.md
  label_rules:
    - label: question
      keywords: ["how do i", "question"]
"#;

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn credential_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        ("APP_ID", "77"),
        ("PRIVATE_KEY_PATH", "/keys/app.pem"),
        ("WEBHOOK_SECRET", "env-secret"),
    ]
}

#[test]
fn test_explicit_file_is_loaded() {
    let file = yaml_file(FULL_YAML);
    let path = file.path().to_str().unwrap();

    let config = load(&[], &vars(&[(CONFIG_FILE_VAR, path)])).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.webhook_path, "/github/webhook");
    assert_eq!(config.github.app_id, 123456);
    assert_eq!(config.github.webhook_secret.expose(), b"from-file");
    assert_eq!(config.github.request_timeout_seconds, 10);
    assert!(config.logging.json_format);
    assert_eq!(config.bot.hub_repository.full_name(), "acme/handbook-hub");
    assert_eq!(config.bot.sync.len(), 1);
    assert_eq!(config.bot.label_rules[0].label, "question");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = load(
        &[],
        &vars(&[(CONFIG_FILE_VAR, "/definitely/not/here/service.yaml")]),
    );

    assert!(matches!(result, Err(ConfigError::Parsing { .. })));
}

#[test]
fn test_missing_default_files_are_skipped() {
    let config = load(&["/definitely/not/here/service"], &vars(&credential_vars())).unwrap();

    assert_eq!(config.github.app_id, 77);
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_prefixed_env_overrides_file() {
    let file = yaml_file(FULL_YAML);
    let path = file.path().to_str().unwrap();

    let config = load(
        &[],
        &vars(&[
            (CONFIG_FILE_VAR, path),
            ("DHB__SERVER__PORT", "9090"),
            ("DHB__GITHUB__USER_AGENT", "docs-hub-bot-staging"),
        ]),
    )
    .unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.github.user_agent, "docs-hub-bot-staging");
    assert_eq!(config.github.app_id, 123456);
}

#[test]
fn test_flat_variables_override_everything() {
    let file = yaml_file(FULL_YAML);
    let path = file.path().to_str().unwrap();

    let config = load(
        &[],
        &vars(&[
            (CONFIG_FILE_VAR, path),
            ("DHB__SERVER__PORT", "9090"),
            ("PORT", "4000"),
            ("APP_ID", "999"),
            ("WEBHOOK_SECRET", "flat-secret"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
        ]),
    )
    .unwrap();

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.github.app_id, 999);
    assert_eq!(config.github.webhook_secret.expose(), b"flat-secret");
    assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(config.github.private_key_path, "/run/secrets/app.pem");
}

#[test]
fn test_empty_flat_variable_is_ignored() {
    let mut pairs = credential_vars();
    pairs.push(("PORT", ""));

    let config = load(&[], &vars(&pairs)).unwrap();

    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_missing_credentials_fail_validation() {
    let result = load(&[], &HashMap::new());

    assert!(matches!(result, Err(ConfigError::Missing { .. })));
}

#[test]
fn test_wrongly_typed_value_is_an_error() {
    let mut pairs = credential_vars();
    pairs.push(("PORT", "eighty"));

    assert!(matches!(
        load(&[], &vars(&pairs)),
        Err(ConfigError::Parsing { .. })
    ));
}

#[test]
fn test_invalid_repository_in_file_is_an_error() {
    let file = yaml_file("bot:\n  hub_repository: not-a-repository\n");
    let path = file.path().to_str().unwrap();
    let mut pairs = credential_vars();
    pairs.push((CONFIG_FILE_VAR, path));

    assert!(load(&[], &vars(&pairs)).is_err());
}

#[test]
#[serial]
fn test_load_from_process_environment() {
    let file = yaml_file(FULL_YAML);
    std::env::set_var(CONFIG_FILE_VAR, file.path());
    std::env::set_var("DHB__GITHUB__REQUEST_TIMEOUT_SECONDS", "45");

    let result = load_from_env();

    std::env::remove_var(CONFIG_FILE_VAR);
    std::env::remove_var("DHB__GITHUB__REQUEST_TIMEOUT_SECONDS");

    let config = result.unwrap();
    assert_eq!(config.github.request_timeout_seconds, 45);
    assert_eq!(config.bot.hub_repository.full_name(), "acme/handbook-hub");
}
