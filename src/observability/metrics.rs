//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, outcome
//! - `proxy_cache_lookups_total` (counter): lookups by result
//! - `proxy_cache_evictions_total` (counter): LRU evictions
//! - `proxy_cache_entries` (gauge): current cache size
//! - `proxy_active_connections` (gauge): in-flight connections
//! - `proxy_tunnel_bytes_total` (counter): tunneled bytes by direction

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Failure is logged, not
/// fatal: the proxy runs fine without a scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(error = %error, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, outcome: &'static str) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_cache_lookup(result: &'static str) {
    metrics::counter!("proxy_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_eviction() {
    metrics::counter!("proxy_cache_evictions_total").increment(1);
}

pub fn record_cache_size(entries: usize) {
    metrics::gauge!("proxy_cache_entries").set(entries as f64);
}

pub fn record_active_connections(count: u64) {
    metrics::gauge!("proxy_active_connections").set(count as f64);
}

pub fn record_tunnel_bytes(sent: u64, received: u64) {
    metrics::counter!("proxy_tunnel_bytes_total", "direction" => "client_to_upstream")
        .increment(sent);
    metrics::counter!("proxy_tunnel_bytes_total", "direction" => "upstream_to_client")
        .increment(received);
}
