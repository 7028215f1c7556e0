//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge
//! router. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

use crate::routing::hostname::EnvironmentMode;

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Running mode: local, preview, or production.
    pub environment: EnvironmentMode,

    /// Routing behavior (local root host, excluded prefixes).
    pub routing: RoutingConfig,

    /// Rendering origin requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Hosted content database (existence lookups).
    pub content_api: ContentApiConfig,

    /// Existence cache settings.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Routing behavior knobs that are deployment-specific.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Root host in local mode (e.g., "localhost:3000").
    pub local_root: String,

    /// Path prefixes the decision engine never sees; requests are
    /// forwarded verbatim (API, static assets, image optimization).
    pub excluded_prefixes: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            local_root: "localhost:3000".to_string(),
            excluded_prefixes: vec![
                "/api/".to_string(),
                "/assets/".to_string(),
                "/_image".to_string(),
            ],
        }
    }
}

/// Rendering origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin authority (e.g., "127.0.0.1:3000").
    pub origin: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Hosted content database access.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentApiConfig {
    /// Base URL of the REST interface (e.g., "https://xyz.supabase.co").
    pub base_url: String,

    /// API key; sent as `apikey` and bearer token.
    pub api_key: String,

    /// Blog post table name.
    pub posts_table: String,

    /// App table name (queried before games).
    pub apps_table: String,

    /// Game table name.
    pub games_table: String,

    /// Per-lookup timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            api_key: String::new(),
            posts_table: "posts".to_string(),
            apps_table: "apps".to_string(),
            games_table: "games".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Existence cache settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
