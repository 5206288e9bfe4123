//! GitHub App metadata types.

use serde::{Deserialize, Serialize};

/// GitHub App metadata as returned by `GET /app`.
///
/// Only the fields the bot reads are modelled; GitHub sends many more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct App {
    /// Unique numeric identifier for the GitHub App
    pub id: u64,

    /// URL-friendly string identifier for the app
    #[serde(default)]
    pub slug: Option<String>,

    /// Display name of the GitHub App
    pub name: String,

    /// Owner of the GitHub App (user or organization)
    #[serde(default)]
    pub owner: Option<AppOwner>,

    /// GitHub URL for the app's page
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Account that owns a GitHub App.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppOwner {
    pub login: String,
    pub id: u64,
}
