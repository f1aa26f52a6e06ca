//! Cluster handle wrapper and database factory
//!
//! Stores in this family expose a single conventional database name per
//! cluster; [`DEFAULT_DATABASE_NAME`] is what the convenience open paths
//! use. Both a blocking and a non-blocking variant of the database open
//! are offered, since callers may be in either execution context.

use crate::client::ClientInner;
use crate::database::Database;
use std::sync::Arc;
use tessera_core::{ClusterHandle, DatabaseOptions, Error, Result};
use tracing::info;

/// The conventional database name every cluster exposes
pub const DEFAULT_DATABASE_NAME: &str = "DB";

/// An open cluster connection
///
/// Created through [`crate::Client::open_cluster_sync`] or its async
/// variant, which guarantee the network thread is running first.
#[derive(Clone)]
pub struct Cluster {
    pub(crate) inner: Arc<ClientInner>,
    pub(crate) handle: ClusterHandle,
}

impl Cluster {
    /// The driver-owned cluster handle
    pub fn handle(&self) -> &ClusterHandle {
        &self.handle
    }

    /// Open a named database and apply its options, blocking
    ///
    /// Options are applied one at a time in caller order; the first
    /// driver rejection aborts the rest and is surfaced verbatim.
    pub fn open_database_sync(
        &self,
        name: &str,
        options: Option<&DatabaseOptions>,
    ) -> Result<Database> {
        let handle = self.inner.driver.open_database(&self.handle, name)?;
        let database = Database::new(self.inner.driver.clone(), handle);
        if let Some(options) = options {
            database.set_options(options)?;
        }
        info!(target: "tessera::client", name, "database opened");
        Ok(database)
    }

    /// Open a named database and apply its options, non-blocking
    ///
    /// The delegated driver call runs on a blocking-capable worker; this
    /// future suspends only for that call.
    pub async fn open_database(
        &self,
        name: &str,
        options: Option<DatabaseOptions>,
    ) -> Result<Database> {
        let cluster = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || cluster.open_database_sync(&name, options.as_ref()))
            .await
            .map_err(|e| Error::internal(format!("blocking open task failed: {}", e)))?
    }
}
