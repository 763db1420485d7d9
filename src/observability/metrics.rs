//! Metric recording.
//!
//! # Metrics
//! - `health_probe_invocations_total` (counter): probe calls by probe, status
//! - `health_aggregate_status` (gauge): 1=UP, 0=DOWN per category
//! - `health_registry_probes` (gauge): probe count per category, set once
//!   at population

use crate::check::{Category, Outcome, Status};

/// Record one probe invocation.
pub fn record_probe_outcome(outcome: &Outcome) {
    metrics::counter!(
        "health_probe_invocations_total",
        "probe" => outcome.name.clone(),
        "status" => outcome.status.to_string()
    )
    .increment(1);
}

/// Record the combined status of one aggregation pass.
pub fn record_aggregate_status(category: Category, status: Status) {
    metrics::gauge!(
        "health_aggregate_status",
        "category" => category.as_str()
    )
    .set(if status.is_up() { 1.0 } else { 0.0 });
}

/// Record the registry size for a category at population time.
pub fn record_registry_size(category: Category, count: usize) {
    metrics::gauge!(
        "health_registry_probes",
        "category" => category.as_str()
    )
    .set(count as f64);
}
