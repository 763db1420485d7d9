//! Probe contract and invocation result types.
//!
//! # Data Flow
//! ```text
//! Probe author implements Probe (probe.rs):
//!     call() → OutcomeBuilder (outcome.rs) → Outcome
//!
//! Registry stores ProbeHandle per category (registry/)
//!     → Aggregation engine invokes each handle (aggregate/)
//!     → Outcomes folded into one combined Status
//! ```
//!
//! # Design Decisions
//! - A probe reports failure through a `Down` outcome, never by panicking;
//!   a panic is a contract violation and is not caught here
//! - Outcomes are immutable once built
//! - The outcome data map is created lazily: absent unless the probe
//!   attached at least one entry, never present-but-empty

pub mod outcome;
pub mod probe;

pub use outcome::{DataValue, Outcome, OutcomeBuilder, Status};
pub use probe::{Category, Probe, ProbeHandle, ProbeTags};
