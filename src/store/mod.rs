//! Content backend subsystem.
//!
//! # Data Flow
//! ```text
//! engine "does slug exist?"
//!     → resolver.rs (cache check, fail-open policy)
//!     → rest.rs (point lookup against the hosted content database)
//!     → Lookup::{Found, NotFound, Failed}
//! ```
//!
//! # Design Decisions
//! - The store is a trait so the engine and resolver are testable with an
//!   in-memory fake
//! - Lookups are read-only point queries by exact slug; the router never
//!   writes to the backend
//! - A failed lookup is collapsed to "not found" in exactly one place
//!   (resolver), and failures are never cached

pub mod resolver;
pub mod rest;

pub use resolver::ExistenceResolver;
pub use rest::{ContentStore, ContentTable, RestStore, StoreError};
