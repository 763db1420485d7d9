//! Category invocation and the combine fold.

use axum::http::StatusCode;
use serde::Serialize;

use crate::check::{Category, Outcome, Status};
use crate::error::DiscoveryError;
use crate::observability::metrics;
use crate::registry::HealthRegistry;

/// Combined, endpoint-facing result over one category's outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    /// DOWN iff at least one outcome is DOWN; an empty sequence is UP.
    pub status: Status,

    /// Individual outcomes, in probe invocation order.
    pub checks: Vec<Outcome>,
}

impl AggregatedResult {
    /// Fold the outcomes into one combined status. The fold's identity
    /// element is `Up`, so an empty sequence aggregates to `Up`.
    pub fn from_outcomes(checks: Vec<Outcome>) -> Self {
        let status = checks
            .iter()
            .fold(Status::Up, |combined, outcome| combined.combine(outcome.status));
        Self { status, checks }
    }

    /// Transport-level signal for the combined status.
    pub fn http_status(&self) -> StatusCode {
        if self.status.is_up() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Invoke every probe of `category` and aggregate the outcomes.
///
/// Ensures the registry is populated first (lazy path), then calls each
/// probe synchronously in discovery order on the caller's thread. A probe
/// that panics instead of reporting DOWN violates the probe contract; the
/// panic propagates and fails the request.
pub fn invoke(
    registry: &HealthRegistry,
    category: Category,
) -> Result<AggregatedResult, DiscoveryError> {
    registry.populate()?;

    let probes = registry.probes(category);
    let mut checks = Vec::with_capacity(probes.len());
    for probe in &probes {
        let outcome = probe.call();
        tracing::debug!(
            category = %category,
            probe = %outcome.name,
            status = %outcome.status,
            "probe invoked"
        );
        metrics::record_probe_outcome(&outcome);
        checks.push(outcome);
    }

    let result = AggregatedResult::from_outcomes(checks);
    metrics::record_aggregate_status(category, result.status);
    Ok(result)
}
