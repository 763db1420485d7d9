//! Observability subsystem.
//!
//! Structured logging goes through `tracing` at the call sites that own
//! the events; this module only carries metric recording. The crate never
//! installs a subscriber or a metrics exporter, both belong to the host.

pub mod metrics;
