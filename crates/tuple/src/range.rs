//! Prefix-range helpers built on the tuple encoding
//!
//! Range reads against the storage engine take a `(begin, end)` byte pair
//! and scan keys with `begin <= key < end`. The helpers here compute such
//! pairs for "everything under this prefix" queries.

use crate::codec::pack;
use crate::element::TupleElement;
use crate::error::TupleError;

/// Smallest byte string strictly greater than every string prefixed by `key`
///
/// Trailing `0xFF` bytes cannot be incremented, so they are truncated and
/// the last remaining byte is bumped: `strinc(b"ab\xff") == b"ac"`.
///
/// # Errors
///
/// [`TupleError::Unbounded`] when `key` is empty or consists entirely of
/// `0xFF` bytes; no successor exists.
///
/// # Examples
///
/// ```
/// use tessera_tuple::strinc;
///
/// assert_eq!(strinc(b"abc").unwrap(), b"abd");
/// assert_eq!(strinc(b"ab\xff").unwrap(), b"ac");
/// assert!(strinc(b"\xff\xff").is_err());
/// ```
pub fn strinc(key: &[u8]) -> Result<Vec<u8>, TupleError> {
    let last_incrementable = key
        .iter()
        .rposition(|&b| b != 0xFF)
        .ok_or(TupleError::Unbounded)?;
    let mut out = key[..=last_incrementable].to_vec();
    out[last_incrementable] += 1;
    Ok(out)
}

/// `(begin, end)` byte pair covering every tuple extending `elements`
///
/// `begin` is the packed prefix followed by `0x00` (the smallest possible
/// continuation) and `end` is the packed prefix followed by `0xFF`; every
/// key packed from a strict extension of `elements` falls in between, and
/// the prefix tuple itself does not.
pub fn range(elements: &[TupleElement]) -> (Vec<u8>, Vec<u8>) {
    let packed = pack(elements);
    let mut begin = packed.clone();
    begin.push(0x00);
    let mut end = packed;
    end.push(0xFF);
    (begin, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    // === strinc ===

    #[test]
    fn test_strinc_plain() {
        assert_eq!(strinc(b"abc").unwrap(), b"abd".to_vec());
    }

    #[test]
    fn test_strinc_trailing_max() {
        assert_eq!(strinc(b"ab\xff").unwrap(), b"ac".to_vec());
        assert_eq!(strinc(b"a\xff\xff\xff").unwrap(), b"b".to_vec());
    }

    #[test]
    fn test_strinc_all_max_fails() {
        assert_eq!(strinc(b"\xff\xff"), Err(TupleError::Unbounded));
        assert_eq!(strinc(b"\xff"), Err(TupleError::Unbounded));
    }

    #[test]
    fn test_strinc_empty_fails() {
        assert_eq!(strinc(b""), Err(TupleError::Unbounded));
    }

    #[test]
    fn test_strinc_bounds_all_extensions() {
        let bound = strinc(b"abc").unwrap();
        for extension in [&b"abc"[..], b"abcz", b"abc\xff\xff\xff", b"abd"] {
            let covered = extension.starts_with(b"abc");
            assert_eq!(
                extension < bound.as_slice(),
                covered,
                "{:?} vs bound {:?}",
                extension,
                bound
            );
        }
    }

    // === range ===

    #[test]
    fn test_range_covers_extensions() {
        let prefix = vec![TupleElement::String("user".into())];
        let (begin, end) = range(&prefix);

        let inside = pack(&[
            TupleElement::String("user".into()),
            TupleElement::Int(42),
        ]);
        let outside = pack(&[TupleElement::String("uses".into())]);
        let bare = pack(&prefix);

        assert!(begin <= inside && inside < end);
        assert!(!(begin <= outside && outside < end));
        // The prefix tuple itself is below the range.
        assert!(bare < begin);
    }

    #[test]
    fn test_range_of_empty_tuple() {
        let (begin, end) = range(&[]);
        assert_eq!(begin, vec![0x00]);
        assert_eq!(end, vec![0xFF]);
    }
}
