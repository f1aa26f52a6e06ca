//! Test double for the native driver
//!
//! [`RecordingDriver`] implements [`NativeDriver`] entirely in memory: it
//! counts lifecycle calls, records applied options in order, and can be
//! told to fail specific calls with a driver error code. The client's own
//! tests run against it, and downstream crates can reuse it to exercise
//! their open paths without a running cluster.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tessera_core::{
    ClusterHandle, DatabaseHandle, Error, HandleToken, NativeDriver, OptionValue, Result,
};

/// Driver-private state behind a [`ClusterHandle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterToken {
    /// Cluster file the connection was opened with; `None` is the default
    pub cluster_file: Option<PathBuf>,
}

/// Driver-private state behind a [`DatabaseHandle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseToken {
    /// Database name the handle was opened for
    pub name: String,
}

#[derive(Debug, Default)]
struct CallLog {
    selected_versions: Vec<i32>,
    start_calls: usize,
    stop_calls: usize,
    network_options: Vec<(u32, OptionValue)>,
    database_options: Vec<(String, u32, OptionValue)>,
    clusters_created: Vec<Option<PathBuf>>,
    databases_opened: Vec<String>,
}

/// In-memory recording implementation of [`NativeDriver`]
#[derive(Debug, Default)]
pub struct RecordingDriver {
    log: Mutex<CallLog>,
    fail_select: Mutex<Option<i32>>,
    fail_start: Mutex<Option<i32>>,
    fail_stop: Mutex<Option<i32>>,
    reject_network: Mutex<Option<(u32, i32)>>,
    reject_database: Mutex<Option<(u32, i32)>>,
}

impl RecordingDriver {
    /// Fresh driver with empty call log
    pub fn new() -> Self {
        Self::default()
    }

    // === Call log accessors ===

    /// Versions passed to `select_api_version`, in order
    pub fn selected_versions(&self) -> Vec<i32> {
        self.log.lock().selected_versions.clone()
    }

    /// Number of `start_network` calls that reached the driver
    pub fn start_calls(&self) -> usize {
        self.log.lock().start_calls
    }

    /// Number of `stop_network` calls that reached the driver
    pub fn stop_calls(&self) -> usize {
        self.log.lock().stop_calls
    }

    /// Network options applied, as `(code, value)` in application order
    pub fn network_options(&self) -> Vec<(u32, OptionValue)> {
        self.log.lock().network_options.clone()
    }

    /// Database options applied, as `(database, code, value)` in order
    pub fn database_options(&self) -> Vec<(String, u32, OptionValue)> {
        self.log.lock().database_options.clone()
    }

    /// Cluster files passed to `create_cluster`, in order
    pub fn clusters_created(&self) -> Vec<Option<PathBuf>> {
        self.log.lock().clusters_created.clone()
    }

    /// Database names passed to `open_database`, in order
    pub fn databases_opened(&self) -> Vec<String> {
        self.log.lock().databases_opened.clone()
    }

    // === Failure injection ===

    /// Fail the next `select_api_version` with the given driver code
    pub fn fail_next_select(&self, code: i32) {
        *self.fail_select.lock() = Some(code);
    }

    /// Fail the next `start_network` with the given driver code
    pub fn fail_next_start(&self, code: i32) {
        *self.fail_start.lock() = Some(code);
    }

    /// Fail the next `stop_network` with the given driver code
    pub fn fail_next_stop(&self, code: i32) {
        *self.fail_stop.lock() = Some(code);
    }

    /// Reject every attempt to set the network option `option_code`
    pub fn reject_network_option(&self, option_code: u32, error_code: i32) {
        *self.reject_network.lock() = Some((option_code, error_code));
    }

    /// Reject every attempt to set the database option `option_code`
    pub fn reject_database_option(&self, option_code: u32, error_code: i32) {
        *self.reject_database.lock() = Some((option_code, error_code));
    }

    fn take_injected(slot: &Mutex<Option<i32>>, what: &str) -> Result<()> {
        if let Some(code) = slot.lock().take() {
            return Err(Error::driver(code, format!("injected {} failure", what)));
        }
        Ok(())
    }
}

impl NativeDriver for RecordingDriver {
    fn select_api_version(&self, version: i32) -> Result<()> {
        Self::take_injected(&self.fail_select, "select_api_version")?;
        self.log.lock().selected_versions.push(version);
        Ok(())
    }

    fn start_network(&self) -> Result<()> {
        Self::take_injected(&self.fail_start, "start_network")?;
        self.log.lock().start_calls += 1;
        Ok(())
    }

    fn stop_network(&self) -> Result<()> {
        Self::take_injected(&self.fail_stop, "stop_network")?;
        self.log.lock().stop_calls += 1;
        Ok(())
    }

    fn set_network_option(&self, code: u32, value: &OptionValue) -> Result<()> {
        if let Some((rejected, error_code)) = *self.reject_network.lock() {
            if rejected == code {
                return Err(Error::driver(
                    error_code,
                    format!("network option {} rejected", code),
                ));
            }
        }
        self.log.lock().network_options.push((code, value.clone()));
        Ok(())
    }

    fn create_cluster(&self, cluster_file: Option<&Path>) -> Result<ClusterHandle> {
        let cluster_file = cluster_file.map(Path::to_path_buf);
        self.log.lock().clusters_created.push(cluster_file.clone());
        Ok(ClusterHandle(HandleToken::new(ClusterToken {
            cluster_file,
        })))
    }

    fn open_database(&self, _cluster: &ClusterHandle, name: &str) -> Result<DatabaseHandle> {
        self.log.lock().databases_opened.push(name.to_string());
        Ok(DatabaseHandle(HandleToken::new(DatabaseToken {
            name: name.to_string(),
        })))
    }

    fn set_database_option(
        &self,
        database: &DatabaseHandle,
        code: u32,
        value: &OptionValue,
    ) -> Result<()> {
        if let Some((rejected, error_code)) = *self.reject_database.lock() {
            if rejected == code {
                return Err(Error::driver(
                    error_code,
                    format!("database option {} rejected", code),
                ));
            }
        }
        let name = database
            .0
            .downcast::<DatabaseToken>()
            .map(|t| t.name.clone())
            .unwrap_or_default();
        self.log
            .lock()
            .database_options
            .push((name, code, value.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_driver_logs_lifecycle() {
        let driver = RecordingDriver::new();
        driver.select_api_version(510).unwrap();
        driver.start_network().unwrap();
        driver.stop_network().unwrap();

        assert_eq!(driver.selected_versions(), vec![510]);
        assert_eq!(driver.start_calls(), 1);
        assert_eq!(driver.stop_calls(), 1);
    }

    #[test]
    fn test_injected_failure_fires_once() {
        let driver = RecordingDriver::new();
        driver.fail_next_start(1510);
        assert!(driver.start_network().is_err());
        assert!(driver.start_network().is_ok());
        assert_eq!(driver.start_calls(), 1);
    }

    #[test]
    fn test_cluster_token_carries_path() {
        let driver = RecordingDriver::new();
        let handle = driver
            .create_cluster(Some(Path::new("/etc/tessera/cluster")))
            .unwrap();
        let token = handle.0.downcast::<ClusterToken>().unwrap();
        assert_eq!(
            token.cluster_file.as_deref(),
            Some(Path::new("/etc/tessera/cluster"))
        );
    }
}
