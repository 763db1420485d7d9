//! Probe registry subsystem.
//!
//! # Data Flow
//! ```text
//! Host wires a ProbeSource (source.rs)
//!     → HealthRegistry::populate (store.rs)
//!     → discover() yields DiscoveredProbe entries
//!     → providers resolved, scoped resources recorded
//!     → probes classified into General / Liveness / Readiness
//!     → immutable snapshot published, read lock-free thereafter
//!
//! Shutdown:
//!     Lifecycle controller drains the owned resource set (lifecycle/)
//! ```
//!
//! # Design Decisions
//! - Population runs exactly once, guarded by a mutex with a lock-free
//!   snapshot fast path (test-and-test-and-set)
//! - A discovery failure is terminal: the registry parks in `Failed` and
//!   every later access returns the stored error, never an all-UP response
//! - Probe lists are cached at population time, including probes visible
//!   only in General; nothing is re-resolved per request
//! - Exactly one source per registry; installing a second is ignored with
//!   a warning (first wins, mirroring first-result provider lookup)

pub mod source;
pub mod store;

pub use source::{
    DiscoveredProbe, OwnedResource, ProbeProvider, ProbeRef, ProbeSource, ProvidedProbe,
    StaticProbeSource,
};
pub use store::HealthRegistry;
