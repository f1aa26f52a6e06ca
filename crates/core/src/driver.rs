//! Trait seam over the store's native driver
//!
//! The native driver owns the wire protocol, the background network
//! thread, and every handle it hands out; this crate only prepares inputs
//! for it. [`NativeDriver`] captures exactly the calls the client layer
//! consumes, so the lifecycle and factory code can be exercised against a
//! recording double without linking the real driver.
//!
//! All trait methods are synchronous. Non-blocking variants are provided
//! by the client layer, which moves the call onto a blocking-capable
//! worker; suspension never happens inside encoding or state handling.

use crate::error::Result;
use crate::options::OptionValue;
use std::any::Any;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Opaque, cloneable token for a driver-owned handle
///
/// Driver implementations stash whatever state they need behind the token
/// and recover it with [`HandleToken::downcast`]. The client layer never
/// looks inside. Handles have no close surface; the driver reclaims them
/// at process exit.
#[derive(Clone)]
pub struct HandleToken {
    inner: Arc<dyn Any + Send + Sync>,
}

impl HandleToken {
    /// Wrap driver-private state into an opaque token
    pub fn new<T: Any + Send + Sync>(state: T) -> Self {
        HandleToken {
            inner: Arc::new(state),
        }
    }

    /// Recover the driver-private state, if `T` is the stored type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for HandleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleToken").finish_non_exhaustive()
    }
}

/// Opaque reference to a driver-owned cluster connection
#[derive(Debug, Clone)]
pub struct ClusterHandle(pub HandleToken);

/// Opaque reference to a driver-owned database
#[derive(Debug, Clone)]
pub struct DatabaseHandle(pub HandleToken);

/// The calls this layer consumes from the native driver
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the client shares one driver
/// instance across every cluster, database, and worker thread.
pub trait NativeDriver: Send + Sync {
    /// Select the API version for the process; callable at most once
    fn select_api_version(&self, version: i32) -> Result<()>;

    /// Start the background network thread
    fn start_network(&self) -> Result<()>;

    /// Stop the background network thread; called once at shutdown
    fn stop_network(&self) -> Result<()>;

    /// Apply one network option before the network starts
    fn set_network_option(&self, code: u32, value: &OptionValue) -> Result<()>;

    /// Open a cluster connection; `None` means the driver default file
    fn create_cluster(&self, cluster_file: Option<&Path>) -> Result<ClusterHandle>;

    /// Open a named database within a cluster
    fn open_database(&self, cluster: &ClusterHandle, name: &str) -> Result<DatabaseHandle>;

    /// Apply one database option to an open database
    fn set_database_option(
        &self,
        database: &DatabaseHandle,
        code: u32,
        value: &OptionValue,
    ) -> Result<()>;
}
