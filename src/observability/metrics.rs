//! Metrics collection and exposition.
//!
//! # Metrics
//! - `failsafe_mode` (gauge): 1=tripped, 0=closed
//! - `failsafe_transitions_total` (counter): transitions by direction
//! - `failsafe_persistence_failures_total` (counter): failed state writes
//! - `failsafe_notifications_total` (counter): dispatched messages by reason
//! - `failsafe_notifier_failures_total` (counter): backend delivery failures
//! - `failsafe_evaluations_skipped_total` (counter): loop ticks gated by the breaker

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_failsafe_mode(enabled: bool) {
    gauge!("failsafe_mode").set(if enabled { 1.0 } else { 0.0 });
    let direction = if enabled { "trip" } else { "reset" };
    counter!("failsafe_transitions_total", "direction" => direction).increment(1);
}

pub fn record_persistence_failure() {
    counter!("failsafe_persistence_failures_total").increment(1);
}

pub fn record_notification(reason: &'static str) {
    counter!("failsafe_notifications_total", "reason" => reason).increment(1);
}

pub fn record_notifier_failure(notifier: &str) {
    counter!("failsafe_notifier_failures_total", "notifier" => notifier.to_string()).increment(1);
}

pub fn record_evaluation_skipped() {
    counter!("failsafe_evaluations_skipped_total").increment(1);
}
