//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs, and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::uri::Authority;
use std::net::SocketAddr;
use std::str::FromStr;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem with a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidUpstreamOrigin(String),
    InvalidContentApiUrl(String),
    ZeroCacheTtl,
    ZeroRequestTimeout,
    EmptyLocalRoot,
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(v) => {
                write!(f, "listener.bind_address is not a socket address: {v}")
            }
            ValidationError::InvalidUpstreamOrigin(v) => {
                write!(f, "upstream.origin is not a host:port authority: {v}")
            }
            ValidationError::InvalidContentApiUrl(v) => {
                write!(f, "content_api.base_url is not a valid URL: {v}")
            }
            ValidationError::ZeroCacheTtl => write!(f, "cache.ttl_secs must be greater than zero"),
            ValidationError::ZeroRequestTimeout => {
                write!(f, "timeouts.request_secs must be greater than zero")
            }
            ValidationError::EmptyLocalRoot => write!(f, "routing.local_root must not be empty"),
            ValidationError::InvalidMetricsAddress(v) => {
                write!(f, "observability.metrics_address is not a socket address: {v}")
            }
        }
    }
}

/// Check everything, collect everything.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Authority::from_str(&config.upstream.origin).is_err() {
        errors.push(ValidationError::InvalidUpstreamOrigin(
            config.upstream.origin.clone(),
        ));
    }

    if Url::parse(&config.content_api.base_url).is_err() {
        errors.push(ValidationError::InvalidContentApiUrl(
            config.content_api.base_url.clone(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError::ZeroCacheTtl);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.routing.local_root.trim().is_empty() {
        errors.push(ValidationError::EmptyLocalRoot);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
