//! Discovery abstraction over the host's probe wiring.
//!
//! The registry never depends on a concrete discovery mechanism (DI
//! container, plugin loader, explicit registration). It only requires that
//! a [`ProbeSource`] yields the full set of probes before first use.

use crate::check::{Probe, ProbeHandle, ProbeTags};
use crate::error::{DiscoveryError, ResourceError};

/// A scope-bound instance created while resolving a probe.
///
/// Recorded during population and released exactly once at shutdown.
/// Normal-scoped probes (stable, reusable handles) carry no owned resource.
pub trait OwnedResource: Send {
    /// Name used in release-failure diagnostics.
    fn name(&self) -> &str;

    /// Release the resource. Called at most once.
    fn release(&mut self) -> Result<(), ResourceError>;
}

/// A probe handle resolved by a provider, plus the resource backing it
/// when the resolution created a scope-bound instance.
pub struct ProvidedProbe {
    pub probe: ProbeHandle,
    pub resource: Option<Box<dyn OwnedResource>>,
}

impl ProvidedProbe {
    /// A normal-scoped probe: stable handle, nothing to release.
    pub fn shared(probe: ProbeHandle) -> Self {
        Self {
            probe,
            resource: None,
        }
    }

    /// A probe whose resolution context must be released at shutdown.
    pub fn scoped(probe: ProbeHandle, resource: Box<dyn OwnedResource>) -> Self {
        Self {
            probe,
            resource: Some(resource),
        }
    }
}

/// Deferred resolution of a probe reference.
///
/// Covers discovery entries that are not probes themselves (a factory or
/// producer reference). `provide` runs once, during population; resolution
/// failures abort population since this is the only place lookups occur.
pub trait ProbeProvider: Send + Sync {
    fn provide(&self) -> Result<ProvidedProbe, DiscoveryError>;
}

/// One entry yielded by discovery: a resolved handle or a provider to
/// resolve during population.
pub enum ProbeRef {
    Handle(ProbeHandle),
    Provider(Box<dyn ProbeProvider>),
}

/// A discovered probe with its classification tags.
pub struct DiscoveredProbe {
    pub probe: ProbeRef,
    pub tags: ProbeTags,
}

impl DiscoveredProbe {
    pub fn handle(probe: ProbeHandle, tags: ProbeTags) -> Self {
        Self {
            probe: ProbeRef::Handle(probe),
            tags,
        }
    }

    pub fn provider(provider: Box<dyn ProbeProvider>, tags: ProbeTags) -> Self {
        Self {
            probe: ProbeRef::Provider(provider),
            tags,
        }
    }
}

/// The host-side mechanism that knows which probes exist.
pub trait ProbeSource: Send + Sync {
    /// Yield every probe for this process. Called once, during population.
    fn discover(&self) -> Result<Vec<DiscoveredProbe>, DiscoveryError>;
}

/// Explicit-registration source for hosts without a discovery mechanism,
/// and for tests.
#[derive(Default)]
pub struct StaticProbeSource {
    probes: std::sync::Mutex<Vec<(ProbeHandle, ProbeTags)>>,
}

impl StaticProbeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe under the given tags. Registration order is the
    /// category order seen by the endpoint.
    pub fn register(&self, probe: impl Probe + 'static, tags: ProbeTags) -> &Self {
        let handle: ProbeHandle = std::sync::Arc::new(probe);
        self.probes
            .lock()
            .expect("probe source lock poisoned")
            .push((handle, tags));
        self
    }
}

impl ProbeSource for StaticProbeSource {
    fn discover(&self) -> Result<Vec<DiscoveredProbe>, DiscoveryError> {
        let probes = self.probes.lock().expect("probe source lock poisoned");
        Ok(probes
            .iter()
            .map(|(probe, tags)| DiscoveredProbe::handle(probe.clone(), *tags))
            .collect())
    }
}
