//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by routing action
//! - `edge_upstream_duration_seconds` (histogram): origin latency
//! - `edge_cache_lookups_total` (counter): existence-cache hits/misses
//! - `edge_cache_entries` (gauge): live entries per cache
//! - `edge_store_errors_total` (counter): failed backend point lookups
//!
//! # Design Decisions
//! - Labels: routing action, cache name, backend table, upstream status
//! - Exporter is optional; recording without an exporter is a no-op

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a routing decision by terminal action.
pub fn record_decision(action: &'static str) {
    counter!("edge_requests_total", "action" => action).increment(1);
}

/// Count an existence-cache lookup.
pub fn record_cache_lookup(cache: &'static str, hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!("edge_cache_lookups_total", "cache" => cache, "outcome" => outcome).increment(1);
}

/// Track live entry count per cache.
pub fn record_cache_size(cache: &'static str, entries: usize) {
    gauge!("edge_cache_entries", "cache" => cache).set(entries as f64);
}

/// Count a failed backend point lookup.
pub fn record_store_error(table: &'static str) {
    counter!("edge_store_errors_total", "table" => table).increment(1);
}

/// Record an upstream round-trip.
pub fn record_upstream(status: u16, start: Instant) {
    counter!("edge_upstream_responses_total", "status" => status.to_string()).increment(1);
    histogram!("edge_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
