//! Startup and shutdown coordination for the registry.

use std::sync::Mutex;

use crate::error::{DiscoveryError, ShutdownError};
use crate::registry::HealthRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Started,
    Stopped,
}

/// Drives registry population at start-of-day and resource release at
/// shutdown.
///
/// The state machine is linear: `Idle → Started → Stopped`, no re-entry.
pub struct Lifecycle {
    state: Mutex<State>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Idle),
        }
    }

    /// Populate the registry. Valid from `Idle`; a second call is a no-op
    /// with a warning. A discovery error aborts startup and leaves the
    /// lifecycle in `Idle` so the host sees the failure, not a half-start.
    pub fn start(&self, registry: &HealthRegistry) -> Result<(), DiscoveryError> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        match *state {
            State::Idle => {
                registry.populate()?;
                *state = State::Started;
                tracing::info!("health lifecycle started");
                Ok(())
            }
            State::Started => {
                tracing::warn!("health lifecycle already started; ignoring second start");
                Ok(())
            }
            State::Stopped => {
                tracing::warn!("health lifecycle already stopped; ignoring start");
                Ok(())
            }
        }
    }

    /// Release every owned probe resource, best-effort.
    ///
    /// Every release is attempted regardless of earlier failures. Zero
    /// failures succeed silently; exactly one propagates unwrapped; two or
    /// more are composed into [`ShutdownError::Multiple`] in release order
    /// (which is registration order). Calling from `Idle` releases an
    /// empty set and succeeds.
    pub fn stop(&self, registry: &HealthRegistry) -> Result<(), ShutdownError> {
        let mut state = self.state.lock().expect("lifecycle lock poisoned");
        if *state == State::Stopped {
            tracing::warn!("health lifecycle already stopped; ignoring second stop");
            return Ok(());
        }
        *state = State::Stopped;
        drop(state);

        let mut failures = Vec::new();
        for mut resource in registry.take_owned_resources() {
            if let Err(error) = resource.release() {
                tracing::error!(resource = %error.resource, error = %error, "resource release failed");
                failures.push(error);
            }
        }

        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0).into()),
            _ => Err(ShutdownError::Multiple(failures)),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
