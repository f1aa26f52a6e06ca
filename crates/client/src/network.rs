//! Network thread lifecycle
//!
//! The driver runs one background network thread per process. Every open
//! path funnels through [`NetworkLifecycle::ensure_started`], which starts
//! that thread at most once; the owning [`crate::Client`] releases it
//! exactly once on drop. Network options can only be applied while the
//! thread has not started yet.

use crate::gate::VersionGate;
use parking_lot::Mutex;
use std::sync::Arc;
use tessera_core::{Error, NativeDriver, NetworkOptions, Result};
use tracing::{debug, info, warn};

/// Lifecycle states of the driver's network thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Not started; network options may still be applied
    Uninitialized,
    /// Background thread running
    Running,
    /// Stopped at shutdown; no further transitions
    Stopped,
}

/// One-shot starter and stopper for the driver's network thread
///
/// # Thread Safety
///
/// All transitions happen under one mutex, held across the delegated
/// driver call: concurrent `ensure_started` races collapse to exactly one
/// native start, and every caller observes the decided state.
pub struct NetworkLifecycle {
    driver: Arc<dyn NativeDriver>,
    state: Mutex<NetworkState>,
}

impl NetworkLifecycle {
    pub(crate) fn new(driver: Arc<dyn NativeDriver>) -> Self {
        NetworkLifecycle {
            driver,
            state: Mutex::new(NetworkState::Uninitialized),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> NetworkState {
        *self.state.lock()
    }

    /// Apply network options; only possible before the network starts
    ///
    /// Options are applied one at a time in the order supplied; the first
    /// option the driver rejects aborts the rest and is surfaced verbatim.
    /// After `ensure_started` has run — even if the network has since been
    /// stopped — this fails, the configuration window is closed.
    pub fn configure(&self, options: &NetworkOptions) -> Result<()> {
        let state = self.state.lock();
        if *state != NetworkState::Uninitialized {
            return Err(Error::NetworkAlreadyStarted);
        }
        for option in options.entries() {
            let code = option.code();
            self.driver.set_network_option(code, &option.value())?;
            debug!(target: "tessera::net", code, "network option applied");
        }
        Ok(())
    }

    /// Start the network thread if it has not been started yet
    ///
    /// Fails before the driver is touched when no API version is locked.
    /// A no-op in `Running` and `Stopped`; a stopped network is never
    /// restarted. On driver failure the state stays `Uninitialized` and
    /// the error propagates to every racing caller that loses the retry.
    pub(crate) fn ensure_started(&self, gate: &VersionGate) -> Result<()> {
        let version = gate.require()?;
        let mut state = self.state.lock();
        match *state {
            NetworkState::Running | NetworkState::Stopped => Ok(()),
            NetworkState::Uninitialized => {
                self.driver.start_network()?;
                *state = NetworkState::Running;
                info!(
                    target: "tessera::net",
                    api_version = version,
                    "network thread started"
                );
                Ok(())
            }
        }
    }

    /// Stop the network thread; runs at most once
    ///
    /// The transition to `Stopped` happens before the driver call and is
    /// never rolled back: stopping is not retried, a failure is logged and
    /// surfaced but the lifecycle is over either way.
    pub(crate) fn shutdown(&self) -> Result<()> {
        let mut state = self.state.lock();
        if *state != NetworkState::Running {
            return Ok(());
        }
        *state = NetworkState::Stopped;
        match self.driver.stop_network() {
            Ok(()) => {
                info!(target: "tessera::net", "network thread stopped");
                Ok(())
            }
            Err(e) => {
                warn!(target: "tessera::net", error = %e, "network stop failed");
                Err(e)
            }
        }
    }
}
