//! Common test utilities for Docs Hub Bot integration tests
//!
//! This module provides:
//! - A router wired to the real GitHub client, pointed at a wiremock server
//! - Signed webhook request builders
//! - Mock GitHub API responses for tokens, contents, comments and labels

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use base64::Engine;
use docs_hub_bot_api::{create_router, AppIdentity, AppState, ServiceConfig, WebhookSecret};
use docs_hub_bot_core::{BotConfig, EventDispatcher, RuleSet};
use github_app_sdk::auth::{AuthConfig, GitHubAppAuth};
use github_app_sdk::{ClientConfig, GitHubAppId, GitHubClient, PrivateKey, SignatureValidator};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WEBHOOK_SECRET: &str = "integration-test-secret";
pub const APP_ID: u64 = 424242;
pub const INSTALLATION_ID: u64 = 1234;
pub const INSTALLATION_TOKEN: &str = "ghs_integration_token";

const PRIVATE_KEY_PEM: &str = include_str!("../../../github-app-sdk/test_data/app_private_key.pem");

// ============================================================================
// Application Under Test
// ============================================================================

/// GitHub client authenticating with the test key against `server`.
pub fn github_client(server: &MockServer) -> GitHubClient {
    let private_key = PrivateKey::from_pem(PRIVATE_KEY_PEM).unwrap();
    let auth_config = AuthConfig {
        github_api_url: server.uri(),
        ..AuthConfig::default()
    };
    let auth = GitHubAppAuth::new(GitHubAppId::new(APP_ID), private_key, auth_config).unwrap();

    GitHubClient::builder(auth)
        .config(ClientConfig::default().with_github_api_url(server.uri()))
        .build()
        .unwrap()
}

/// Router with default automation rules, talking to `server`.
pub fn test_app(server: &MockServer) -> Router {
    let mut config = ServiceConfig::default();
    config.github.app_id = APP_ID;
    config.github.private_key_path = "unused.pem".to_string();
    config.github.webhook_secret = WebhookSecret::new(WEBHOOK_SECRET);
    config.github.api_url = server.uri();

    let rules = RuleSet::new(BotConfig::default());
    let dispatcher = Arc::new(EventDispatcher::new(rules, Arc::new(github_client(server))));
    let identity = AppIdentity {
        name: "Docs Hub Bot".to_string(),
        id: APP_ID,
    };

    create_router(AppState::new(config, dispatcher, identity))
}

// ============================================================================
// Requests and Responses
// ============================================================================

/// Webhook request signed with the test secret.
pub fn signed_webhook(event_type: &str, payload: &Value) -> Request<Body> {
    let body = serde_json::to_vec(payload).unwrap();
    let signature = SignatureValidator::new(WEBHOOK_SECRET).sign(&body).unwrap();

    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-github-event", event_type)
        .header("x-github-delivery", "f2a9c1d0-0000-4000-8000-000000000001")
        .header("x-hub-signature-256", signature)
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Requests the mock server received for `http_method` on `url_path`.
pub async fn requests_to(server: &MockServer, http_method: &str, url_path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == http_method && r.url.path() == url_path)
        .collect()
}

// ============================================================================
// Mock GitHub API
// ============================================================================

pub fn token_path() -> String {
    format!("/app/installations/{}/access_tokens", INSTALLATION_ID)
}

/// Issue installation tokens for the test installation.
pub async fn mount_installation_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(token_path()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": INSTALLATION_TOKEN,
            "expires_at": "2099-01-01T00:00:00Z"
        })))
        .mount(server)
        .await;
}

/// Contents API response for a file.
pub fn file_body(file_path: &str, content: &str, sha: &str) -> Value {
    json!({
        "type": "file",
        "path": file_path,
        "sha": sha,
        "size": content.len(),
        "encoding": "base64",
        "content": base64::engine::general_purpose::STANDARD.encode(content)
    })
}

/// Contents API response for a successful write.
pub fn write_body(file_path: &str, commit_sha: &str) -> Value {
    json!({
        "content": { "path": file_path, "sha": "new-blob-sha", "size": 1 },
        "commit": { "sha": commit_sha, "html_url": "https://github.com/example/commit" }
    })
}

pub fn contents_path(repository: &str, file_path: &str) -> String {
    format!("/repos/{}/contents/{}", repository, file_path)
}

pub fn installation() -> Value {
    json!({ "id": INSTALLATION_ID })
}
