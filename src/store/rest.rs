//! REST client for the hosted content database.
//!
//! # Responsibilities
//! - Point lookups: "does a row with this slug exist in table T"
//! - Speak the backend's REST dialect:
//!   `GET {base}/rest/v1/{table}?select=slug&slug=eq.{slug}&limit=1`
//!
//! # Design Decisions
//! - Responses are JSON arrays; a non-empty array means the slug exists
//! - The API key is sent both as `apikey` and as a bearer token
//! - Per-request timeout from config; a timeout is a `StoreError` like any
//!   other transport failure (the resolver decides what that means)

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::ContentApiConfig;

/// Content tables the router can consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTable {
    Posts,
    Apps,
    Games,
}

impl ContentTable {
    /// Stable label for logs and metrics.
    pub fn kind(self) -> &'static str {
        match self {
            ContentTable::Posts => "posts",
            ContentTable::Apps => "apps",
            ContentTable::Games => "games",
        }
    }
}

/// Errors from a backend point lookup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content API returned status {0}")]
    Status(u16),
}

/// Existence lookups against the content backend.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// True if a published row with `slug` exists in `table`.
    async fn slug_exists(&self, table: ContentTable, slug: &str) -> Result<bool, StoreError>;
}

/// `ContentStore` over the hosted database's REST interface.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    posts_table: String,
    apps_table: String,
    games_table: String,
    timeout: Duration,
}

impl RestStore {
    pub fn new(config: &ContentApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            posts_table: config.posts_table.clone(),
            apps_table: config.apps_table.clone(),
            games_table: config.games_table.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn table_name(&self, table: ContentTable) -> &str {
        match table {
            ContentTable::Posts => &self.posts_table,
            ContentTable::Apps => &self.apps_table,
            ContentTable::Games => &self.games_table,
        }
    }
}

#[async_trait]
impl ContentStore for RestStore {
    async fn slug_exists(&self, table: ContentTable, slug: &str) -> Result<bool, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table_name(table));
        let slug_filter = format!("eq.{slug}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", "slug"),
                ("slug", slug_filter.as_str()),
                ("limit", "1"),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        let rows: Vec<Value> = response.json().await?;
        Ok(!rows.is_empty())
    }
}
