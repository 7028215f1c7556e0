//! Caching subsystem.
//!
//! # Data Flow
//! ```text
//! resolver lookup(slug)
//!     → ttl.rs get(slug): live entry? return cached bool
//!     → miss: backend point query
//!     → ttl.rs set(slug, bool, ttl)
//! ```
//!
//! # Design Decisions
//! - One entry per slug; a live entry is authoritative until it expires
//! - Expiry is a monotonic-clock deadline checked on read (no timers),
//!   so tests control time through the injected clock
//! - No invalidation on content mutation: answers may be stale for up to
//!   one TTL window after a create/edit/delete

pub mod ttl;

pub use ttl::{Clock, ExistenceCache, MonotonicClock};
