//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init observability → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C or trigger → Stop accepting → Drain in-flight → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast on startup: any config or bind error is fatal
//! - Shutdown drains gracefully; there is no long-running work to cancel
//!   beyond in-flight origin round-trips

pub mod shutdown;

pub use shutdown::Shutdown;
