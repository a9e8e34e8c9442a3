//! Scan metrics

use crate::{ScannerError, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder; the handle renders the current snapshot
pub fn install_prometheus() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ScannerError::Config(format!("Failed to install metrics recorder: {}", e)))?;
    Ok(handle)
}

/// Record the counters of one league scan
pub fn record_league_scan(sport_key: &str, events: usize, lines: usize, surebets: usize) {
    let sport = sport_key.to_string();
    metrics::counter!("surebet_events_scanned_total", events as u64, "sport" => sport.clone());
    metrics::counter!("surebet_lines_evaluated_total", lines as u64, "sport" => sport.clone());
    metrics::counter!("surebet_opportunities_total", surebets as u64, "sport" => sport);
}

/// Record a failed league retrieval
pub fn record_retrieval_failure(sport_key: &str) {
    metrics::increment_counter!("surebet_retrieval_failures_total", "sport" => sport_key.to_string());
}

/// Record the wall time of a full scan
pub fn record_scan_duration(elapsed: Duration) {
    metrics::histogram!("surebet_scan_duration_seconds", elapsed.as_secs_f64());
}
