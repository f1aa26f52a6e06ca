//! Process-wide API version lock
//!
//! The native driver accepts exactly one version-selection call per
//! process; everything downstream (option codes, encodings) is generated
//! against that revision. [`VersionGate`] validates the requested version,
//! forwards it to the driver once, and rejects later attempts to re-lock
//! to a different value.

use parking_lot::Mutex;
use std::sync::Arc;
use tessera_core::version::validate_api_version;
use tessera_core::{Error, NativeDriver, Result};
use tracing::info;

/// Holds the single locked API version for the process
///
/// # Thread Safety
///
/// First-caller-wins under concurrent races: the mutex is held across the
/// driver's version-selection call, so exactly one call reaches the driver
/// and every concurrent caller observes the decided outcome.
pub struct VersionGate {
    driver: Arc<dyn NativeDriver>,
    locked: Mutex<Option<i32>>,
}

impl VersionGate {
    pub(crate) fn new(driver: Arc<dyn NativeDriver>) -> Self {
        VersionGate {
            driver,
            locked: Mutex::new(None),
        }
    }

    /// Lock the API version, forwarding it to the driver on first call
    ///
    /// Re-locking the same value is a no-op; the driver is not called
    /// again. Re-locking a different value fails with a conflict naming
    /// the already-locked version. Out-of-range values are rejected before
    /// any driver call. If the driver rejects the selection, the gate
    /// stays unlocked.
    pub fn select(&self, version: i32) -> Result<()> {
        let mut locked = self.locked.lock();
        match *locked {
            Some(current) if current == version => Ok(()),
            Some(current) => Err(Error::VersionConflict {
                locked: current,
                requested: version,
            }),
            None => {
                validate_api_version(version)?;
                self.driver.select_api_version(version)?;
                *locked = Some(version);
                info!(target: "tessera::client", version, "API version locked");
                Ok(())
            }
        }
    }

    /// The locked version, if any
    pub fn current(&self) -> Option<i32> {
        *self.locked.lock()
    }

    /// The locked version, or the error open paths must fail with
    pub(crate) fn require(&self) -> Result<i32> {
        (*self.locked.lock()).ok_or(Error::VersionNotSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDriver;
    use tessera_core::ErrorKind;

    fn gate() -> (Arc<RecordingDriver>, VersionGate) {
        let driver = Arc::new(RecordingDriver::new());
        let gate = VersionGate::new(driver.clone());
        (driver, gate)
    }

    // === Locking ===

    #[test]
    fn test_lock_forwards_once() {
        let (driver, gate) = gate();
        gate.select(510).unwrap();
        gate.select(510).unwrap();
        gate.select(510).unwrap();
        assert_eq!(driver.selected_versions(), vec![510]);
        assert_eq!(gate.current(), Some(510));
    }

    #[test]
    fn test_every_supported_version_locks() {
        for v in 500..=510 {
            let (driver, gate) = gate();
            gate.select(v).unwrap();
            assert_eq!(driver.selected_versions(), vec![v]);
        }
    }

    #[test]
    fn test_relock_different_version_conflicts() {
        let (driver, gate) = gate();
        gate.select(510).unwrap();
        let err = gate.select(500).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("510"));
        // The gate still holds the original version.
        assert_eq!(gate.current(), Some(510));
        assert_eq!(driver.selected_versions(), vec![510]);
    }

    #[test]
    fn test_conflict_beats_range_check_once_locked() {
        let (_driver, gate) = gate();
        gate.select(510).unwrap();
        // 499 is out of range, but the gate is already locked: conflict.
        let err = gate.select(499).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    // === Validation ===

    #[test]
    fn test_out_of_range_rejected_before_driver() {
        let (driver, gate) = gate();
        assert_eq!(gate.select(499).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(gate.select(511).unwrap_err().kind(), ErrorKind::Range);
        assert!(driver.selected_versions().is_empty());
        assert_eq!(gate.current(), None);
    }

    #[test]
    fn test_driver_rejection_leaves_gate_unlocked() {
        let (driver, gate) = gate();
        driver.fail_next_select(2201);
        let err = gate.select(510).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Driver);
        assert_eq!(gate.current(), None);
        // A later attempt succeeds and reaches the driver.
        gate.select(510).unwrap();
        assert_eq!(gate.current(), Some(510));
    }

    // === Concurrency ===

    #[test]
    fn test_concurrent_first_calls_lock_once() {
        let driver = Arc::new(RecordingDriver::new());
        let gate = Arc::new(VersionGate::new(
            driver.clone() as Arc<dyn NativeDriver>
        ));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.select(510))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(driver.selected_versions(), vec![510]);
    }
}
