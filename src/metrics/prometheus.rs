use std::net::SocketAddr;

use anyhow::Context;
use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus HTTP exporter on `addr`.
/// After this call, any metrics recorded via the `metrics` crate
/// macros (counter!, histogram!) are automatically exported at /metrics.
pub fn init_metrics_server(addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .with_context(|| format!("failed to start Prometheus metrics server on {addr}"))
}

// ── Optimizer metrics ────────────────────────────────────────────

pub fn record_solve(solver: &str) {
    counter!("optimizer_solves_total", "solver" => solver.to_string()).increment(1);
}

pub fn record_solve_latency_us(solver: &str, latency_us: u128) {
    histogram!("optimizer_solve_latency_us", "solver" => solver.to_string())
        .record(latency_us as f64);
}

pub fn record_utility(solver: &str, u: f64) {
    histogram!("optimizer_utility", "solver" => solver.to_string()).record(u);
}

// ── Session metrics ──────────────────────────────────────────────

/// `kind` is one of `domain`, `policy`, `command`.
pub fn record_rejection(kind: &str) {
    counter!("session_rejections_total", "kind" => kind.to_string()).increment(1);
}
