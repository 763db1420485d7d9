//! Error definitions for the health registry.
//!
//! # Taxonomy
//! - Discovery errors are fatal at population time: the registry never
//!   reaches `Ready` and every later access surfaces the stored error.
//! - Resource release errors are non-fatal individually; shutdown attempts
//!   every release and aggregates the failures.
//! - A probe that panics instead of reporting a `Down` outcome violates the
//!   probe contract; the panic is deliberately not caught anywhere in this
//!   crate and surfaces to the endpoint layer as a server error.

use thiserror::Error;

/// Errors raised while discovering and resolving probes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// No probe source was installed before the first access.
    #[error("no probe source installed; install one before the first health request")]
    NoSource,

    /// A provider reference could not be resolved to a concrete probe.
    #[error("no concrete probe found for '{probe}'")]
    NotFound { probe: String },

    /// A provider reference matched more than one concrete probe.
    #[error("ambiguous resolution for '{probe}': {candidates} candidates")]
    Ambiguous { probe: String, candidates: usize },

    /// The probe source itself failed.
    #[error("probe discovery failed: {0}")]
    Source(String),
}

/// A single owned resource that could not be released at shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to release '{resource}': {message}")]
pub struct ResourceError {
    /// Name of the resource, for diagnostics.
    pub resource: String,

    /// Host-reported failure detail.
    pub message: String,
}

impl ResourceError {
    pub fn new(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Aggregated shutdown failure.
///
/// A single failed release propagates unwrapped; two or more are composed
/// into one error carrying all of them in release order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShutdownError {
    /// Exactly one resource failed to release.
    #[error(transparent)]
    Release(#[from] ResourceError),

    /// Two or more resources failed to release.
    #[error("{} health check resources failed to release", .0.len())]
    Multiple(Vec<ResourceError>),
}
