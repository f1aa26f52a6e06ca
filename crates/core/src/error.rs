//! Error types for the Tessera client
//!
//! All validation errors are raised locally, before any driver call is
//! made; once a driver call has been issued its error is surfaced verbatim
//! as [`Error::Driver`]. This layer never retries — retry policy belongs
//! to the transaction engine above it.

use tessera_tuple::TupleError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Tessera client
#[derive(Debug, Error)]
pub enum Error {
    /// Requested API version predates the oldest supported protocol
    #[error("API version {requested} is below the minimum supported version {min}")]
    VersionTooOld {
        /// The rejected version
        requested: i32,
        /// Oldest version this client speaks
        min: i32,
    },

    /// Requested API version is newer than this client's option tables
    #[error(
        "API version {requested} is above the maximum supported version {max}; \
         update the client library"
    )]
    VersionTooNew {
        /// The rejected version
        requested: i32,
        /// Newest version this client speaks
        max: i32,
    },

    /// A different API version is already locked for this process
    #[error("client already initialized with API version {locked}; cannot re-lock to {requested}")]
    VersionConflict {
        /// Version locked by the first successful call
        locked: i32,
        /// Version this call asked for
        requested: i32,
    },

    /// No API version has been locked yet
    #[error("an API version must be selected before connecting; call set_api_version first")]
    VersionNotSet,

    /// Network options arrived after the network thread was started
    #[error("network options must be applied before the first cluster or database is opened")]
    NetworkAlreadyStarted,

    /// Fixed-width codec was handed a buffer of the wrong size
    #[error("expected exactly {expected} bytes, got {actual}")]
    UnexpectedWidth {
        /// Width the codec requires
        expected: usize,
        /// Width actually supplied
        actual: usize,
    },

    /// Text codec was handed bytes that are not valid UTF-8
    #[error("value is not valid UTF-8")]
    InvalidText,

    /// Decoded key does not begin with the database's key prefix
    #[error("key does not begin with the database prefix")]
    PrefixMismatch,

    /// Structured-value codec failure
    #[error("structured value codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tuple codec failure
    #[error(transparent)]
    Tuple(#[from] TupleError),

    /// Error surfaced by the native driver, passed through unmodified
    #[error("driver error {code}: {message}")]
    Driver {
        /// Driver-defined error code
        code: i32,
        /// Driver-provided message
        message: String,
    },

    /// Invariant violation inside the client itself
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`]
///
/// Tests and callers that only care about the class of failure match on
/// this instead of individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input had the wrong shape (byte width, tag, encoding)
    Type,
    /// Value outside the supported bounds
    Range,
    /// Contradicts an earlier, already-locked decision
    Conflict,
    /// A required configuration step has not happened yet
    NotConfigured,
    /// The configuration window has already closed
    TooLate,
    /// Surfaced from the native driver
    Driver,
    /// Client-internal invariant violation
    Internal,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::VersionTooOld { .. } | Error::VersionTooNew { .. } => ErrorKind::Range,
            Error::VersionConflict { .. } => ErrorKind::Conflict,
            Error::VersionNotSet => ErrorKind::NotConfigured,
            Error::NetworkAlreadyStarted => ErrorKind::TooLate,
            Error::UnexpectedWidth { .. }
            | Error::InvalidText
            | Error::PrefixMismatch
            | Error::Json(_) => ErrorKind::Type,
            Error::Tuple(inner) => {
                if inner.is_range() {
                    ErrorKind::Range
                } else {
                    ErrorKind::Type
                }
            }
            Error::Driver { .. } => ErrorKind::Driver,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Construct a driver pass-through error
    pub fn driver(code: i32, message: impl Into<String>) -> Self {
        Error::Driver {
            code,
            message: message.into(),
        }
    }

    /// Construct an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_errors_are_range() {
        let err = Error::VersionTooOld {
            requested: 499,
            min: 500,
        };
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = Error::VersionTooNew {
            requested: 511,
            max: 510,
        };
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_conflict_kind() {
        let err = Error::VersionConflict {
            locked: 510,
            requested: 500,
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("510"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_lifecycle_kinds() {
        assert_eq!(Error::VersionNotSet.kind(), ErrorKind::NotConfigured);
        assert_eq!(Error::NetworkAlreadyStarted.kind(), ErrorKind::TooLate);
    }

    #[test]
    fn test_tuple_errors_split_by_inner_variant() {
        let range = Error::Tuple(TupleError::Unbounded);
        assert_eq!(range.kind(), ErrorKind::Range);

        let shape = Error::Tuple(TupleError::UnexpectedEnd(3));
        assert_eq!(shape.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_driver_passthrough() {
        let err = Error::driver(1031, "transaction timed out");
        assert_eq!(err.kind(), ErrorKind::Driver);
        assert!(err.to_string().contains("1031"));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_width_mismatch_is_type() {
        let err = Error::UnexpectedWidth {
            expected: 4,
            actual: 7,
        };
        assert_eq!(err.kind(), ErrorKind::Type);
    }
}
