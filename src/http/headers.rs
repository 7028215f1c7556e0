//! Edge response headers.
//!
//! # Responsibilities
//! - Fixed header set on every non-redirect response: clients and CDNs
//!   must not cache it, prefetch from it, or frame it
//!
//! # Design Decisions
//! - Applied uniformly regardless of which routing rule matched, so the
//!   routing behavior cannot be bypassed by stale caches or prefetching
//! - External 301s carry none of these; the Location is the contract there

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate";

static X_DNS_PREFETCH_CONTROL: HeaderName = HeaderName::from_static("x-dns-prefetch-control");

/// Stamp the no-cache/no-prefetch/no-frame header set onto a response.
pub fn apply_edge_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(X_DNS_PREFETCH_CONTROL.clone(), HeaderValue::from_static("off"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
}
