//! Probe contract and classification.

use std::sync::Arc;

use crate::check::outcome::Outcome;

/// A single named health check.
///
/// `call` runs synchronously on the caller's thread and must be bounded by
/// the probe author; the registry imposes no timeout. A failing dependency
/// is reported through a `Down` outcome, never by panicking.
pub trait Probe: Send + Sync {
    fn call(&self) -> Outcome;
}

/// Shared, immutable reference to a registered probe.
pub type ProbeHandle = Arc<dyn Probe>;

impl<F> Probe for F
where
    F: Fn() -> Outcome + Send + Sync,
{
    fn call(&self) -> Outcome {
        self()
    }
}

/// Classification flags attached to a probe at discovery time.
///
/// Every probe is visible in the General category; these flags additionally
/// place it in Liveness and/or Readiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeTags {
    pub liveness: bool,
    pub readiness: bool,
}

impl ProbeTags {
    /// No tags: the probe appears only in the General category.
    pub fn general() -> Self {
        Self::default()
    }

    pub fn liveness() -> Self {
        Self {
            liveness: true,
            readiness: false,
        }
    }

    pub fn readiness() -> Self {
        Self {
            liveness: false,
            readiness: true,
        }
    }
}

/// Visibility grouping over probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Every probe, including those tagged Liveness or Readiness.
    General,
    Liveness,
    Readiness,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Liveness => "liveness",
            Category::Readiness => "readiness",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
