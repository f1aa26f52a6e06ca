//! The client context object
//!
//! One [`Client`] per process, constructed at the entry point around the
//! native driver and passed to everything that opens connections. It owns
//! the two pieces of process-wide mutable state — the version gate and the
//! network lifecycle — and releases the network thread when the last clone
//! is dropped, on every exit path.

use crate::cluster::{Cluster, DEFAULT_DATABASE_NAME};
use crate::database::Database;
use crate::gate::VersionGate;
use crate::network::{NetworkLifecycle, NetworkState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tessera_core::{DatabaseOptions, Error, NativeDriver, NetworkOptions, Result};

pub(crate) struct ClientInner {
    pub(crate) driver: Arc<dyn NativeDriver>,
    pub(crate) gate: VersionGate,
    pub(crate) lifecycle: NetworkLifecycle,
}

impl Drop for ClientInner {
    fn drop(&mut self) {
        // Scoped-resource release: runs exactly once, whichever path
        // dropped the last Client. Failures are logged inside shutdown
        // and cannot be surfaced from drop.
        let _ = self.lifecycle.shutdown();
    }
}

/// Handle-constructing entry point for the Tessera client
///
/// Cheap to clone; all clones share the same gate, lifecycle, and driver.
/// The network thread stops when the last clone drops, or earlier via
/// [`Client::shutdown`].
///
/// # Example
///
/// ```ignore
/// let client = Client::new(driver);
/// client.set_api_version(510)?;
/// client.configure_network(&NetworkOptions::new().trace_enable("/var/log"))?;
/// let db = client.open_sync(None, None)?;
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Build a client around a native driver
    ///
    /// Nothing touches the driver until [`Client::set_api_version`] and
    /// the first open call.
    pub fn new(driver: Arc<dyn NativeDriver>) -> Self {
        Client {
            inner: Arc::new(ClientInner {
                gate: VersionGate::new(driver.clone()),
                lifecycle: NetworkLifecycle::new(driver.clone()),
                driver,
            }),
        }
    }

    /// Lock the process-wide API version
    ///
    /// Idempotent for repeated identical values; a different value fails
    /// with a conflict naming the locked version.
    pub fn set_api_version(&self, version: i32) -> Result<()> {
        self.inner.gate.select(version)
    }

    /// The locked API version, if any
    pub fn api_version(&self) -> Option<i32> {
        self.inner.gate.current()
    }

    /// Current network lifecycle state
    pub fn network_state(&self) -> NetworkState {
        self.inner.lifecycle.state()
    }

    /// Apply network options; must precede the first open call
    pub fn configure_network(&self, options: &NetworkOptions) -> Result<()> {
        self.inner.lifecycle.configure(options)
    }

    /// Open a cluster connection, blocking
    ///
    /// Starts the network thread on first use; fails with a
    /// not-configured error when no API version is locked. `None` means
    /// the driver's default cluster file.
    pub fn open_cluster_sync(&self, cluster_file: Option<&Path>) -> Result<Cluster> {
        self.inner.lifecycle.ensure_started(&self.inner.gate)?;
        let handle = self.inner.driver.create_cluster(cluster_file)?;
        Ok(Cluster {
            inner: self.inner.clone(),
            handle,
        })
    }

    /// Open a cluster connection, non-blocking
    pub async fn open_cluster(&self, cluster_file: Option<PathBuf>) -> Result<Cluster> {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.open_cluster_sync(cluster_file.as_deref()))
            .await
            .map_err(|e| Error::internal(format!("blocking open task failed: {}", e)))?
    }

    /// Open the conventional database, blocking
    ///
    /// Composition of [`Client::open_cluster_sync`] and
    /// [`Cluster::open_database_sync`] with [`DEFAULT_DATABASE_NAME`].
    pub fn open_sync(
        &self,
        cluster_file: Option<&Path>,
        options: Option<&DatabaseOptions>,
    ) -> Result<Database> {
        self.open_cluster_sync(cluster_file)?
            .open_database_sync(DEFAULT_DATABASE_NAME, options)
    }

    /// Open the conventional database, non-blocking
    pub async fn open(
        &self,
        cluster_file: Option<PathBuf>,
        options: Option<DatabaseOptions>,
    ) -> Result<Database> {
        let client = self.clone();
        tokio::task::spawn_blocking(move || {
            client.open_sync(cluster_file.as_deref(), options.as_ref())
        })
        .await
        .map_err(|e| Error::internal(format!("blocking open task failed: {}", e)))?
    }

    /// Stop the network thread now instead of at drop
    ///
    /// Later open calls are no-ops on the lifecycle and will surface
    /// driver errors; the network is never restarted.
    pub fn shutdown(&self) -> Result<()> {
        self.inner.lifecycle.shutdown()
    }
}
