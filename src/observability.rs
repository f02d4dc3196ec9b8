use std::net::SocketAddr;

use crate::engine::EngineError;
use crate::model::Category;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: reservation requests. Labels: category, outcome.
pub const RESERVATION_REQUESTS_TOTAL: &str = "fleetres_reservation_requests_total";

/// Histogram: reservation request latency in seconds. Labels: category.
pub const RESERVATION_REQUEST_DURATION_SECONDS: &str =
    "fleetres_reservation_request_duration_seconds";

// ── USE metrics (fleet utilization) ─────────────────────────────

/// Gauge: units in inventory. Labels: category.
pub const UNITS_ACTIVE: &str = "fleetres_units_active";

/// Gauge: reservations in the ledger.
pub const LEDGER_SIZE: &str = "fleetres_ledger_size";

pub const OUTCOME_CREATED: &str = "created";
pub const OUTCOME_UNAVAILABLE: &str = "unavailable";
pub const OUTCOME_REJECTED: &str = "rejected";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

pub(crate) fn record_request(category: Category, outcome: &'static str, elapsed_secs: f64) {
    metrics::counter!(
        RESERVATION_REQUESTS_TOTAL,
        "category" => category.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(RESERVATION_REQUEST_DURATION_SECONDS, "category" => category.as_str())
        .record(elapsed_secs);
}

pub(crate) fn record_rejection(category: Category, err: &EngineError) {
    tracing::debug!(%category, kind = err.kind(), "reservation request rejected: {err}");
    metrics::counter!(
        RESERVATION_REQUESTS_TOTAL,
        "category" => category.as_str(),
        "outcome" => OUTCOME_REJECTED
    )
    .increment(1);
}

pub(crate) fn set_units_active(category: Category, count: usize) {
    metrics::gauge!(UNITS_ACTIVE, "category" => category.as_str()).set(count as f64);
}

pub(crate) fn set_ledger_size(len: usize) {
    metrics::gauge!(LEDGER_SIZE).set(len as f64);
}
