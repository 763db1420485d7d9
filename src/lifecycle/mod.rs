//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Lifecycle::start → Registry.populate (fail fast on discovery error)
//!
//! Shutdown:
//!     Lifecycle::stop → drain owned resource set
//!     → release each resource, continuing past failures
//!     → 0 failures: Ok / 1: that error / 2+: one composite error
//! ```
//!
//! # Design Decisions
//! - Linear state machine Idle → Started → Stopped, no re-entry
//! - A second start is a no-op with a warning: a healthy host never runs
//!   deployment validation twice
//! - Release is best-effort fan-out, never fail-fast

pub mod controller;

pub use controller::Lifecycle;
