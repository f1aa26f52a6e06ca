//! API version bounds and validation
//!
//! The client negotiates one protocol revision per process against the
//! native driver. Both bounds are hard: versions below the minimum predate
//! the behavior this client assumes, and versions above the maximum would
//! need regenerated option tables.

use crate::error::{Error, Result};

/// Oldest API version this client accepts
///
/// Versions 500 through 509 are accepted as a compatibility claim but are
/// not exercised by the test suite; [`MAX_API_VERSION`] is the only fully
/// validated revision.
pub const MIN_API_VERSION: i32 = 500;

/// Newest API version this client accepts
pub const MAX_API_VERSION: i32 = 510;

/// Validate an API version against the supported range
///
/// # Examples
///
/// ```
/// use tessera_core::version::validate_api_version;
///
/// assert!(validate_api_version(510).is_ok());
/// assert!(validate_api_version(499).is_err());
/// assert!(validate_api_version(511).is_err());
/// ```
pub fn validate_api_version(version: i32) -> Result<()> {
    if version < MIN_API_VERSION {
        return Err(Error::VersionTooOld {
            requested: version,
            min: MIN_API_VERSION,
        });
    }
    if version > MAX_API_VERSION {
        return Err(Error::VersionTooNew {
            requested: version,
            max: MAX_API_VERSION,
        });
    }
    Ok(())
}
