//! HTTP endpoint adapter.
//!
//! # Data Flow
//! ```text
//! GET /health | /health/live | /health/ready
//!     → handler picks the category
//!     → aggregate::invoke (lazy-populates the registry on first request)
//!     → 200/503 with the AggregatedResult body
//!     → discovery failure: 500, plain text, no structured body
//! ```
//!
//! DOWN is a successful, well-formed response with a 503 status; only true
//! errors (discovery failure, probe panic) surface as 5xx without a body.

pub mod server;

pub use server::{HealthServer, ServeError};
