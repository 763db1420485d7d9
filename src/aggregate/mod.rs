//! Outcome aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint handler (http/)
//!     → invoke(registry, category) (engine.rs)
//!     → registry.populate() (lazy single-init path)
//!     → each probe called in discovery order
//!     → statuses folded: identity UP, DOWN absorbs
//!     → AggregatedResult { status, checks } → 200 or 503
//! ```
//!
//! # Design Decisions
//! - The fold never short-circuits: every probe runs and every outcome is
//!   reported even when the combined status is already DOWN
//! - DOWN is a well-formed response, not an error; only discovery failures
//!   and probe panics escape this layer

pub mod engine;

pub use engine::{invoke, AggregatedResult};
