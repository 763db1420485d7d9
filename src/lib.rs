//! Health-check aggregation registry.
//!
//! A process-wide collection of independently registered health probes
//! (liveness, readiness, and general checks), invoked on demand, with the
//! individual outcomes combined into one overall status and exposed
//! through read endpoints.
//!
//! # Architecture Overview
//!
//! ```text
//!   Host wiring (DI adapter, plugin loader, or StaticProbeSource)
//!        │ ProbeSource::discover
//!        ▼
//!   ┌──────────────┐  populate (once, guarded)   ┌─────────────────┐
//!   │   registry   │◀────────────────────────────│    lifecycle    │
//!   │  General /   │                             │ start  /  stop  │
//!   │  Liveness /  │  owned resources            │ release fan-out │
//!   │  Readiness   │────────────────────────────▶│ multi-error agg │
//!   └──────┬───────┘                             └─────────────────┘
//!          │ probes(category)
//!          ▼
//!   ┌──────────────┐   AggregatedResult    ┌─────────────────┐
//!   │  aggregate   │──────────────────────▶│      http       │
//!   │ invoke+fold  │                       │ /health[/live,  │
//!   └──────────────┘                       │  /ready] 200/503│
//!                                          └─────────────────┘
//! ```
//!
//! Probes run synchronously on the caller's thread; the registry is
//! populated exactly once (explicitly via [`Lifecycle::start`] or lazily
//! on the first request) and its category lists are immutable thereafter.

// Core subsystems
pub mod aggregate;
pub mod check;
pub mod registry;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use aggregate::AggregatedResult;
pub use check::{Category, DataValue, Outcome, OutcomeBuilder, Probe, ProbeHandle, ProbeTags, Status};
pub use config::HealthConfig;
pub use error::{DiscoveryError, ResourceError, ShutdownError};
pub use http::HealthServer;
pub use lifecycle::Lifecycle;
pub use registry::{
    DiscoveredProbe, HealthRegistry, OwnedResource, ProbeProvider, ProbeRef, ProbeSource,
    ProvidedProbe, StaticProbeSource,
};
