//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout)
//!     → [routing engine decides action]
//!     → 301 answered here, or request forwarded to the origin
//!     → headers.rs (edge header set on non-redirect responses)
//!     → Send to client
//! ```

pub mod headers;
pub mod server;

pub use server::HttpServer;
