//! Decode and range errors for the tuple codec

use thiserror::Error;

/// Errors produced while decoding an encoded tuple or computing key ranges
///
/// Encoding never fails: every [`crate::TupleElement`] has a byte
/// representation. Decoding can fail on truncated or foreign input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TupleError {
    /// Input ended in the middle of an element
    #[error("encoded tuple truncated at offset {0}")]
    UnexpectedEnd(usize),

    /// Type tag byte is not part of the tuple layout
    #[error("unknown type tag 0x{tag:02x} at offset {offset}")]
    UnknownTag {
        /// The unrecognized tag byte
        tag: u8,
        /// Offset of the tag within the input
        offset: usize,
    },

    /// Integer element is wider than the 8 bytes an `i64` can hold
    #[error("integer at offset {offset} does not fit in 64 bits")]
    IntOutOfRange {
        /// Offset of the integer's tag within the input
        offset: usize,
    },

    /// String element contains bytes that are not valid UTF-8
    #[error("string element at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offset of the string's tag within the input
        offset: usize,
    },

    /// No byte string strictly greater than all extensions of the input
    /// exists: the input is empty or consists entirely of 0xFF bytes
    #[error("byte string has no key-order successor")]
    Unbounded,
}

impl TupleError {
    /// True for errors about values outside the representable range,
    /// false for errors about malformed input shape
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            TupleError::IntOutOfRange { .. } | TupleError::Unbounded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TupleError::UnknownTag {
            tag: 0x99,
            offset: 3,
        };
        assert!(err.to_string().contains("0x99"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_range_classification() {
        assert!(TupleError::Unbounded.is_range());
        assert!(TupleError::IntOutOfRange { offset: 0 }.is_range());
        assert!(!TupleError::UnexpectedEnd(0).is_range());
        assert!(!TupleError::InvalidUtf8 { offset: 0 }.is_range());
    }
}
