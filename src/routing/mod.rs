//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, query)
//!     → hostname.rs (root domain / subdomain classification)
//!     → rules.rs (reserved names, blog-likelihood heuristics)
//!     → engine.rs (ordered rule chain, existence confirmation)
//!     → Return: Forward | Redirect | Rewrite
//! ```
//!
//! # Design Decisions
//! - Rule tables are compile-time constants, immutable at runtime
//! - First match wins; rule order is part of the contract
//! - Heuristics run before backend confirmation (cost/precision trade-off)
//! - Deterministic apart from cache/backend state

pub mod engine;
pub mod hostname;
pub mod rules;

pub use engine::{DecisionEngine, RouteAction};
pub use hostname::{EnvironmentMode, HostClassifier, HostContext};
