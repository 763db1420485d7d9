//! Process-scoped probe registry.
//!
//! # States
//! - Uninitialized: no population attempt yet
//! - Populating: the guard mutex is held while discovery runs; concurrent
//!   first callers block here and observe the finished state
//! - Ready: snapshot published, probe lists immutable and read lock-free
//! - Failed: discovery errored; terminal, every access returns the error
//!
//! # Design Decisions
//! - Snapshot lives in a `OnceLock` so the read-heavy path never locks
//! - The owned resource set is append-only during population and drained
//!   exactly once by the shutdown path

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::check::{Category, ProbeHandle};
use crate::error::DiscoveryError;
use crate::observability::metrics;
use crate::registry::source::{OwnedResource, ProbeRef, ProbeSource};

/// Immutable category lists, published once population completes.
#[derive(Default)]
struct Snapshot {
    general: Vec<ProbeHandle>,
    liveness: Vec<ProbeHandle>,
    readiness: Vec<ProbeHandle>,
}

enum Phase {
    Uninitialized,
    Ready,
    Failed(DiscoveryError),
}

/// Registry of health probes, partitioned by category.
///
/// Population runs at most once, either explicitly through the lifecycle
/// controller or lazily on the first read. Both paths go through the same
/// guard, so concurrent first access populates exactly once and no caller
/// ever observes a partially built registry.
pub struct HealthRegistry {
    source: Mutex<Option<Arc<dyn ProbeSource>>>,
    phase: Mutex<Phase>,
    snapshot: OnceLock<Arc<Snapshot>>,
    owned: Mutex<Vec<Box<dyn OwnedResource>>>,
}

impl HealthRegistry {
    /// Create a registry over the given probe source.
    pub fn new(source: impl ProbeSource + 'static) -> Self {
        let registry = Self::unconfigured();
        registry.install_source(source);
        registry
    }

    /// Create a registry with no source yet. First use before a source is
    /// installed fails with [`DiscoveryError::NoSource`].
    pub fn unconfigured() -> Self {
        Self {
            source: Mutex::new(None),
            phase: Mutex::new(Phase::Uninitialized),
            snapshot: OnceLock::new(),
            owned: Mutex::new(Vec::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static HealthRegistry {
        static GLOBAL: OnceLock<HealthRegistry> = OnceLock::new();
        GLOBAL.get_or_init(HealthRegistry::unconfigured)
    }

    /// Install the probe source. Exactly one source is supported; a second
    /// install is ignored with a warning (first wins, the same policy a
    /// first-result provider lookup applies).
    pub fn install_source(&self, source: impl ProbeSource + 'static) {
        let mut slot = self.source.lock().expect("registry source lock poisoned");
        if slot.is_some() {
            tracing::warn!("probe source already installed; ignoring replacement");
            return;
        }
        *slot = Some(Arc::new(source));
    }

    /// Discover, resolve, and classify every probe.
    ///
    /// Idempotent: the first caller populates while holding the guard;
    /// concurrent callers block and then observe the finished state. After
    /// a discovery failure the registry is parked in `Failed` and this
    /// returns the stored error on every call.
    pub fn populate(&self) -> Result<(), DiscoveryError> {
        // Fast path once Ready; the guard below is only for first access.
        if self.snapshot.get().is_some() {
            return Ok(());
        }

        let mut phase = self.phase();
        match &*phase {
            Phase::Ready => Ok(()),
            Phase::Failed(error) => Err(error.clone()),
            Phase::Uninitialized => match self.run_discovery() {
                Ok(snapshot) => {
                    tracing::info!(
                        general = snapshot.general.len(),
                        liveness = snapshot.liveness.len(),
                        readiness = snapshot.readiness.len(),
                        "health registry populated"
                    );
                    metrics::record_registry_size(Category::General, snapshot.general.len());
                    metrics::record_registry_size(Category::Liveness, snapshot.liveness.len());
                    metrics::record_registry_size(Category::Readiness, snapshot.readiness.len());
                    let _ = self.snapshot.set(Arc::new(snapshot));
                    *phase = Phase::Ready;
                    Ok(())
                }
                Err(error) => {
                    tracing::error!(error = %error, "health probe discovery failed");
                    *phase = Phase::Failed(error.clone());
                    Err(error)
                }
            },
        }
    }

    fn run_discovery(&self) -> Result<Snapshot, DiscoveryError> {
        let source = self
            .source
            .lock()
            .expect("registry source lock poisoned")
            .clone()
            .ok_or(DiscoveryError::NoSource)?;

        let mut snapshot = Snapshot::default();
        for entry in source.discover()? {
            let handle = match entry.probe {
                ProbeRef::Handle(handle) => handle,
                ProbeRef::Provider(provider) => {
                    let provided = provider.provide()?;
                    if let Some(resource) = provided.resource {
                        tracing::debug!(
                            resource = resource.name(),
                            "tracking scoped probe resource for shutdown release"
                        );
                        self.owned
                            .lock()
                            .expect("owned resource lock poisoned")
                            .push(resource);
                    }
                    provided.probe
                }
            };

            // Union rule: every probe is visible generally; tags add it to
            // the specific categories.
            snapshot.general.push(handle.clone());
            if entry.tags.liveness {
                snapshot.liveness.push(handle.clone());
            }
            if entry.tags.readiness {
                snapshot.readiness.push(handle);
            }
        }
        Ok(snapshot)
    }

    /// Probes of one category, in discovery order. Empty before population
    /// completes; callers wanting lazy initialization go through
    /// [`populate`](Self::populate) first.
    pub fn probes(&self, category: Category) -> Vec<ProbeHandle> {
        match self.snapshot.get() {
            Some(snapshot) => match category {
                Category::General => snapshot.general.clone(),
                Category::Liveness => snapshot.liveness.clone(),
                Category::Readiness => snapshot.readiness.clone(),
            },
            None => Vec::new(),
        }
    }

    pub fn general(&self) -> Vec<ProbeHandle> {
        self.probes(Category::General)
    }

    pub fn liveness(&self) -> Vec<ProbeHandle> {
        self.probes(Category::Liveness)
    }

    pub fn readiness(&self) -> Vec<ProbeHandle> {
        self.probes(Category::Readiness)
    }

    /// True once population completed successfully.
    pub fn is_ready(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Drain the owned resource set for the shutdown path. Subsequent calls
    /// return an empty set, so resources are released at most once.
    pub fn take_owned_resources(&self) -> Vec<Box<dyn OwnedResource>> {
        std::mem::take(&mut *self.owned.lock().expect("owned resource lock poisoned"))
    }

    fn phase(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().expect("registry phase lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{Outcome, ProbeTags};
    use crate::error::ResourceError;
    use crate::registry::source::{
        DiscoveredProbe, ProbeProvider, ProvidedProbe, StaticProbeSource,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        discoveries: Arc<AtomicUsize>,
    }

    impl ProbeSource for CountingSource {
        fn discover(&self) -> Result<Vec<DiscoveredProbe>, DiscoveryError> {
            self.discoveries.fetch_add(1, Ordering::SeqCst);
            let handle: ProbeHandle = Arc::new(|| Outcome::up("only"));
            Ok(vec![DiscoveredProbe::handle(handle, ProbeTags::general())])
        }
    }

    struct NamedResource {
        name: String,
    }

    impl OwnedResource for NamedResource {
        fn name(&self) -> &str {
            &self.name
        }

        fn release(&mut self) -> Result<(), ResourceError> {
            Ok(())
        }
    }

    struct ScopedProvider;

    impl ProbeProvider for ScopedProvider {
        fn provide(&self) -> Result<ProvidedProbe, DiscoveryError> {
            let handle: ProbeHandle = Arc::new(|| Outcome::up("scoped"));
            Ok(ProvidedProbe::scoped(
                handle,
                Box::new(NamedResource {
                    name: "scoped-ctx".into(),
                }),
            ))
        }
    }

    struct SharedProvider;

    impl ProbeProvider for SharedProvider {
        fn provide(&self) -> Result<ProvidedProbe, DiscoveryError> {
            let handle: ProbeHandle = Arc::new(|| Outcome::up("shared"));
            Ok(ProvidedProbe::shared(handle))
        }
    }

    struct FailingProvider;

    impl ProbeProvider for FailingProvider {
        fn provide(&self) -> Result<ProvidedProbe, DiscoveryError> {
            Err(DiscoveryError::NotFound {
                probe: "missing".into(),
            })
        }
    }

    fn outcome_names(probes: &[ProbeHandle]) -> Vec<String> {
        probes.iter().map(|p| p.call().name).collect()
    }

    #[test]
    fn accessors_are_empty_before_population() {
        let registry = HealthRegistry::new(StaticProbeSource::new());
        assert!(registry.general().is_empty());
        assert!(registry.liveness().is_empty());
        assert!(registry.readiness().is_empty());
        assert!(!registry.is_ready());
    }

    #[test]
    fn populate_applies_category_union_rule() {
        let source = StaticProbeSource::new();
        source.register(|| Outcome::up("plain"), ProbeTags::general());
        source.register(|| Outcome::up("live"), ProbeTags::liveness());
        source.register(|| Outcome::up("ready"), ProbeTags::readiness());
        source.register(
            || Outcome::up("both"),
            ProbeTags {
                liveness: true,
                readiness: true,
            },
        );

        let registry = HealthRegistry::new(source);
        registry.populate().unwrap();

        assert!(registry.is_ready());
        assert_eq!(
            outcome_names(&registry.general()),
            vec!["plain", "live", "ready", "both"]
        );
        assert_eq!(outcome_names(&registry.liveness()), vec!["live", "both"]);
        assert_eq!(outcome_names(&registry.readiness()), vec!["ready", "both"]);
    }

    #[test]
    fn concurrent_first_access_populates_exactly_once() {
        let discoveries = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(HealthRegistry::new(CountingSource {
            discoveries: discoveries.clone(),
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.populate().unwrap();
                    registry.general().len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(discoveries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_source_fails_at_first_use_and_stays_failed() {
        let registry = HealthRegistry::unconfigured();
        assert_eq!(registry.populate(), Err(DiscoveryError::NoSource));
        assert!(!registry.is_ready());

        // Installing a source afterwards does not resurrect the registry.
        registry.install_source(StaticProbeSource::new());
        assert_eq!(registry.populate(), Err(DiscoveryError::NoSource));
    }

    #[test]
    fn provider_failure_aborts_population() {
        let registry = HealthRegistry::new(OnceSource::new(vec![DiscoveredProbe::provider(
            Box::new(FailingProvider),
            ProbeTags::general(),
        )]));
        let error = registry.populate().unwrap_err();
        assert_eq!(
            error,
            DiscoveryError::NotFound {
                probe: "missing".into()
            }
        );
        assert!(!registry.is_ready());
        assert!(registry.general().is_empty());
    }

    #[test]
    fn scoped_resolutions_are_tracked_and_drained_once() {
        let registry = HealthRegistry::new(OnceSource::new(vec![DiscoveredProbe::provider(
            Box::new(ScopedProvider),
            ProbeTags::readiness(),
        )]));
        registry.populate().unwrap();

        let resources = registry.take_owned_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name(), "scoped-ctx");
        assert!(registry.take_owned_resources().is_empty());
    }

    #[test]
    fn shared_resolutions_track_no_resources() {
        let registry = HealthRegistry::new(OnceSource::new(vec![DiscoveredProbe::provider(
            Box::new(SharedProvider),
            ProbeTags::liveness(),
        )]));
        registry.populate().unwrap();

        assert_eq!(outcome_names(&registry.liveness()), vec!["shared"]);
        assert!(registry.take_owned_resources().is_empty());
    }

    #[test]
    fn global_registry_is_process_wide() {
        let first = HealthRegistry::global();
        let second = HealthRegistry::global();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn second_source_install_is_ignored() {
        let first = StaticProbeSource::new();
        first.register(|| Outcome::up("first"), ProbeTags::general());
        let registry = HealthRegistry::new(first);

        let second = StaticProbeSource::new();
        second.register(|| Outcome::up("second"), ProbeTags::general());
        registry.install_source(second);

        registry.populate().unwrap();
        assert_eq!(outcome_names(&registry.general()), vec!["first"]);
    }

    /// Source yielding a fixed entry set, for provider-path tests.
    /// Population runs once, so handing the entries out once is enough.
    struct OnceSource(Mutex<Vec<DiscoveredProbe>>);

    impl OnceSource {
        fn new(entries: Vec<DiscoveredProbe>) -> Self {
            Self(Mutex::new(entries))
        }
    }

    impl ProbeSource for OnceSource {
        fn discover(&self) -> Result<Vec<DiscoveredProbe>, DiscoveryError> {
            Ok(std::mem::take(&mut *self.0.lock().unwrap()))
        }
    }
}
