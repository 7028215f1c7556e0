//! Edge routing layer for the content catalog site.
//!
//! Intercepts every inbound request ahead of the rendering origin and
//! decides one of: pass through, permanent redirect to a canonical URL,
//! permanent redirect to a per-item subdomain, or internal rewrite of a
//! subdomain request onto the `/app/<slug>` routes.

pub mod cache;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
