//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_browser_requests_total` (counter): requests by endpoint, status
//! - `route_browser_request_duration_seconds` (histogram): latency by endpoint
//! - `route_browser_cache_lookups_total` (counter): memo lookups by cache, outcome
//! - `route_browser_cache_entries` (gauge): memo entries by cache
//! - `route_browser_db_errors_total` (counter): data source failures by kind
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "route_browser_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("route_browser_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_lookup(cache: &'static str, hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    metrics::counter!(
        "route_browser_cache_lookups_total",
        "cache" => cache,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_cache_size(cache: &'static str, entries: usize) {
    metrics::gauge!("route_browser_cache_entries", "cache" => cache).set(entries as f64);
}

pub fn record_db_error(kind: &'static str) {
    metrics::counter!("route_browser_db_errors_total", "kind" => kind).increment(1);
}
