//! Hostname classification.
//!
//! # Responsibilities
//! - Compute the root domain for the configured environment mode
//! - Detect whether the request targets a per-item subdomain
//! - Extract the subdomain label(s) when present
//!
//! # Design Decisions
//! - Environment mode is explicit configuration, never inferred from the
//!   hostname string (a production domain may contain a platform suffix)
//! - Hostnames are lowercased before classification (case-insensitive per
//!   HTTP spec, same as route matching)
//! - Malformed hostnames degrade to "not a subdomain" (fail-open to
//!   default routing); classification never errors

use serde::{Deserialize, Serialize};

/// Where the router is running. Controls root-domain derivation and the
/// scheme used when building redirect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    /// Local development: fixed `localhost:<port>` root, subdomain
    /// detection disabled.
    Local,
    /// Preview deployments with platform-generated multi-label hosts:
    /// root is the last three labels.
    Preview,
    /// Production: root is the last two labels.
    #[default]
    Production,
}

impl EnvironmentMode {
    /// Scheme used for externally visible redirect URLs.
    pub fn scheme(self) -> &'static str {
        match self {
            EnvironmentMode::Local => "http",
            EnvironmentMode::Preview | EnvironmentMode::Production => "https",
        }
    }
}

/// Per-request host classification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Lowercased hostname as received.
    pub host: String,
    /// Root domain for the current environment mode.
    pub root_domain: String,
    /// Subdomain label(s) with the root suffix stripped, when the request
    /// targets a subdomain.
    pub subdomain: Option<String>,
}

/// Classifies `Host` headers under a fixed environment mode.
#[derive(Debug, Clone)]
pub struct HostClassifier {
    mode: EnvironmentMode,
    local_root: String,
}

impl HostClassifier {
    pub fn new(mode: EnvironmentMode, local_root: impl Into<String>) -> Self {
        Self {
            mode,
            local_root: local_root.into().to_lowercase(),
        }
    }

    /// Compute root domain and subdomain status for a raw `Host` header.
    pub fn classify(&self, host: &str) -> HostContext {
        let host = host.trim().to_lowercase();
        let root_domain = self.root_domain(&host);

        // Local development is always treated as the root domain.
        let is_subdomain = self.mode != EnvironmentMode::Local
            && !host.starts_with("www.")
            && host != root_domain
            && host.ends_with(&format!(".{root_domain}"));

        let subdomain = if is_subdomain {
            Some(host[..host.len() - root_domain.len() - 1].to_string())
        } else {
            None
        };

        HostContext {
            host,
            root_domain,
            subdomain,
        }
    }

    /// Root domain for a hostname: fixed in local mode, otherwise the last
    /// N dot-separated labels. Hosts with too few labels are their own root.
    fn root_domain(&self, host: &str) -> String {
        let labels_kept = match self.mode {
            EnvironmentMode::Local => return self.local_root.clone(),
            EnvironmentMode::Preview => 3,
            EnvironmentMode::Production => 2,
        };

        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() <= labels_kept {
            return host.to_string();
        }
        labels[labels.len() - labels_kept..].join(".")
    }
}
