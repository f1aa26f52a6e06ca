//! Pack and unpack for tuple encodings
//!
//! ## Wire Layout
//!
//! ```text
//! 0x00              null (escaped to 00 FF inside a nested tuple)
//! 0x01 ... 00       byte string, 00 bytes escaped as 00 FF
//! 0x02 ... 00       UTF-8 string, same escaping
//! 0x05 ... 00       nested tuple, recursively encoded
//! 0x0C..=0x13       negative integer, tag = 0x14 - width
//! 0x14              integer zero
//! 0x15..=0x1C       positive integer, tag = 0x14 + width
//! 0x21 + 8 bytes    double, sign-flip transformed, big-endian
//! 0x26 / 0x27       false / true
//! ```
//!
//! Integers carry the minimal big-endian magnitude; negative values store
//! `2^(8w) - 1 - |v|` so that larger magnitudes compare smaller. Doubles
//! flip all bits when negative and only the sign bit otherwise, which maps
//! IEEE total order onto unsigned byte order.

use crate::element::TupleElement;
use crate::error::TupleError;
use byteorder::{BigEndian, ByteOrder};

pub(crate) const NIL: u8 = 0x00;
pub(crate) const BYTES: u8 = 0x01;
pub(crate) const STRING: u8 = 0x02;
pub(crate) const NESTED: u8 = 0x05;
pub(crate) const INT_ZERO: u8 = 0x14;
pub(crate) const DOUBLE: u8 = 0x21;
pub(crate) const FALSE: u8 = 0x26;
pub(crate) const TRUE: u8 = 0x27;
pub(crate) const ESCAPE: u8 = 0xFF;

/// Encode a tuple into its order-preserving byte representation
///
/// Encoding is total: every sequence of elements has a representation.
/// The empty tuple encodes to the empty byte string.
///
/// # Examples
///
/// ```
/// use tessera_tuple::{pack, TupleElement};
///
/// let lo = pack(&[TupleElement::Int(1), TupleElement::String("a".into())]);
/// let hi = pack(&[TupleElement::Int(1), TupleElement::String("b".into())]);
/// assert!(lo < hi);
/// ```
pub fn pack(elements: &[TupleElement]) -> Vec<u8> {
    let mut out = Vec::with_capacity(elements.len() * 4);
    for element in elements {
        encode_element(element, &mut out, false);
    }
    out
}

/// Decode an encoded tuple back into its elements
///
/// Inverse of [`pack`]: `unpack(&pack(t)) == Ok(t)` for every tuple `t`.
///
/// # Errors
///
/// Fails on truncated input, unknown type tags, integers wider than 8
/// bytes, and string elements that are not valid UTF-8.
pub fn unpack(input: &[u8]) -> Result<Vec<TupleElement>, TupleError> {
    let mut elements = Vec::new();
    let mut pos = 0;
    while pos < input.len() {
        elements.push(decode_element(input, &mut pos)?);
    }
    Ok(elements)
}

fn encode_element(element: &TupleElement, out: &mut Vec<u8>, nested: bool) {
    match element {
        TupleElement::Null => {
            out.push(NIL);
            // A bare 00 inside a nested tuple would read as the terminator.
            if nested {
                out.push(ESCAPE);
            }
        }
        TupleElement::Bool(false) => out.push(FALSE),
        TupleElement::Bool(true) => out.push(TRUE),
        TupleElement::Int(v) => encode_int(*v, out),
        TupleElement::Double(v) => {
            out.push(DOUBLE);
            let mut buf = [0u8; 8];
            BigEndian::write_u64(&mut buf, double_to_order_bits(*v));
            out.extend_from_slice(&buf);
        }
        TupleElement::Bytes(bytes) => {
            out.push(BYTES);
            encode_escaped(bytes, out);
        }
        TupleElement::String(s) => {
            out.push(STRING);
            encode_escaped(s.as_bytes(), out);
        }
        TupleElement::Nested(items) => {
            out.push(NESTED);
            for item in items {
                encode_element(item, out, true);
            }
            out.push(NIL);
        }
    }
}

fn decode_element(input: &[u8], pos: &mut usize) -> Result<TupleElement, TupleError> {
    let offset = *pos;
    let tag = *input.get(offset).ok_or(TupleError::UnexpectedEnd(offset))?;
    *pos += 1;

    match tag {
        NIL => Ok(TupleElement::Null),
        FALSE => Ok(TupleElement::Bool(false)),
        TRUE => Ok(TupleElement::Bool(true)),
        BYTES => Ok(TupleElement::Bytes(decode_escaped(input, pos)?)),
        STRING => {
            let bytes = decode_escaped(input, pos)?;
            let s = String::from_utf8(bytes).map_err(|_| TupleError::InvalidUtf8 { offset })?;
            Ok(TupleElement::String(s))
        }
        NESTED => {
            let mut items = Vec::new();
            loop {
                match input.get(*pos) {
                    None => return Err(TupleError::UnexpectedEnd(*pos)),
                    Some(&NIL) => {
                        // 00 FF is an escaped null element; a bare 00 ends
                        // the nested tuple.
                        if input.get(*pos + 1) == Some(&ESCAPE) {
                            items.push(TupleElement::Null);
                            *pos += 2;
                        } else {
                            *pos += 1;
                            break;
                        }
                    }
                    Some(_) => items.push(decode_element(input, pos)?),
                }
            }
            Ok(TupleElement::Nested(items))
        }
        DOUBLE => {
            let end = *pos + 8;
            if input.len() < end {
                return Err(TupleError::UnexpectedEnd(input.len()));
            }
            let bits = BigEndian::read_u64(&input[*pos..end]);
            *pos = end;
            Ok(TupleElement::Double(order_bits_to_double(bits)))
        }
        0x0C..=0x1C => decode_int(tag, input, pos, offset),
        other => Err(TupleError::UnknownTag { tag: other, offset }),
    }
}

/// Append `bytes` with 00 -> 00 FF escaping and a 00 terminator
fn encode_escaped(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        out.push(b);
        if b == NIL {
            out.push(ESCAPE);
        }
    }
    out.push(NIL);
}

/// Read an escaped, NUL-terminated byte run starting at `*pos`
fn decode_escaped(input: &[u8], pos: &mut usize) -> Result<Vec<u8>, TupleError> {
    let mut out = Vec::new();
    loop {
        match input.get(*pos) {
            None => return Err(TupleError::UnexpectedEnd(*pos)),
            Some(&NIL) => {
                if input.get(*pos + 1) == Some(&ESCAPE) {
                    out.push(NIL);
                    *pos += 2;
                } else {
                    *pos += 1;
                    return Ok(out);
                }
            }
            Some(&b) => {
                out.push(b);
                *pos += 1;
            }
        }
    }
}

/// Minimal big-endian width of a non-zero magnitude, in bytes
fn magnitude_width(m: u64) -> usize {
    ((64 - m.leading_zeros() as usize) + 7) / 8
}

/// Largest magnitude representable in `width` bytes
fn max_for_width(width: usize) -> u64 {
    if width == 8 {
        u64::MAX
    } else {
        (1u64 << (8 * width)) - 1
    }
}

fn encode_int(v: i64, out: &mut Vec<u8>) {
    if v == 0 {
        out.push(INT_ZERO);
        return;
    }

    let magnitude = v.unsigned_abs();
    let width = magnitude_width(magnitude);
    let stored = if v > 0 {
        out.push(INT_ZERO + width as u8);
        magnitude
    } else {
        // Stored as max - |v| so that larger magnitudes compare smaller.
        out.push(INT_ZERO - width as u8);
        max_for_width(width) - magnitude
    };
    let mut buf = [0u8; 8];
    BigEndian::write_uint(&mut buf[..width], stored, width);
    out.extend_from_slice(&buf[..width]);
}

fn decode_int(
    tag: u8,
    input: &[u8],
    pos: &mut usize,
    offset: usize,
) -> Result<TupleElement, TupleError> {
    if tag == INT_ZERO {
        return Ok(TupleElement::Int(0));
    }

    let width = (tag as i32 - INT_ZERO as i32).unsigned_abs() as usize;
    let end = *pos + width;
    if input.len() < end {
        return Err(TupleError::UnexpectedEnd(input.len()));
    }
    let raw = BigEndian::read_uint(&input[*pos..end], width);
    *pos = end;

    if tag > INT_ZERO {
        if raw > i64::MAX as u64 {
            return Err(TupleError::IntOutOfRange { offset });
        }
        Ok(TupleElement::Int(raw as i64))
    } else {
        let magnitude = max_for_width(width) - raw;
        if magnitude == (i64::MAX as u64) + 1 {
            Ok(TupleElement::Int(i64::MIN))
        } else if magnitude > i64::MAX as u64 {
            Err(TupleError::IntOutOfRange { offset })
        } else {
            Ok(TupleElement::Int(-(magnitude as i64)))
        }
    }
}

/// Map a double onto 64 bits whose unsigned order is IEEE total order
fn double_to_order_bits(v: f64) -> u64 {
    let bits = v.to_bits();
    if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits ^ (1 << 63)
    }
}

fn order_bits_to_double(adjusted: u64) -> f64 {
    let bits = if adjusted & (1 << 63) != 0 {
        adjusted ^ (1 << 63)
    } else {
        !adjusted
    };
    f64::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::compare;
    use std::cmp::Ordering;

    fn roundtrip(elements: Vec<TupleElement>) {
        let packed = pack(&elements);
        let unpacked = unpack(&packed).unwrap();
        assert_eq!(elements, unpacked, "round-trip mismatch for {:?}", elements);
    }

    // === Round Trips ===

    #[test]
    fn test_empty_tuple() {
        assert!(pack(&[]).is_empty());
        assert_eq!(unpack(&[]).unwrap(), Vec::<TupleElement>::new());
    }

    #[test]
    fn test_roundtrip_scalars() {
        roundtrip(vec![TupleElement::Null]);
        roundtrip(vec![TupleElement::Bool(false), TupleElement::Bool(true)]);
        roundtrip(vec![TupleElement::Int(0)]);
        roundtrip(vec![TupleElement::Double(3.25)]);
    }

    #[test]
    fn test_roundtrip_int_extremes() {
        for v in [
            i64::MIN,
            i64::MIN + 1,
            -65536,
            -256,
            -255,
            -1,
            0,
            1,
            255,
            256,
            65535,
            i64::MAX - 1,
            i64::MAX,
        ] {
            roundtrip(vec![TupleElement::Int(v)]);
        }
    }

    #[test]
    fn test_roundtrip_double_extremes() {
        for v in [
            f64::NEG_INFINITY,
            f64::MIN,
            -1.5,
            -0.0,
            0.0,
            f64::MIN_POSITIVE,
            1.5,
            f64::MAX,
            f64::INFINITY,
        ] {
            roundtrip(vec![TupleElement::Double(v)]);
        }
    }

    #[test]
    fn test_nan_roundtrips_bit_exactly() {
        let packed = pack(&[TupleElement::Double(f64::NAN)]);
        let unpacked = unpack(&packed).unwrap();
        match unpacked.as_slice() {
            [TupleElement::Double(v)] => assert_eq!(v.to_bits(), f64::NAN.to_bits()),
            other => panic!("unexpected decode: {:?}", other),
        }
    }

    #[test]
    fn test_roundtrip_strings_with_nul() {
        roundtrip(vec![TupleElement::String("h\u{0}llo".into())]);
        roundtrip(vec![TupleElement::Bytes(vec![0, 0xFF, 0, 1])]);
        roundtrip(vec![TupleElement::Bytes(vec![])]);
        roundtrip(vec![TupleElement::String(String::new())]);
    }

    #[test]
    fn test_roundtrip_unicode() {
        roundtrip(vec![TupleElement::String("héllo 日本語 🔑".into())]);
    }

    #[test]
    fn test_roundtrip_nested() {
        roundtrip(vec![TupleElement::Nested(vec![])]);
        roundtrip(vec![TupleElement::Nested(vec![
            TupleElement::Null,
            TupleElement::Int(-42),
            TupleElement::Nested(vec![TupleElement::Bytes(vec![0x00])]),
        ])]);
    }

    #[test]
    fn test_roundtrip_mixed() {
        roundtrip(vec![
            TupleElement::String("user".into()),
            TupleElement::Int(123),
            TupleElement::Double(0.5),
            TupleElement::Bool(true),
            TupleElement::Null,
            TupleElement::Bytes(b"blob".to_vec()),
        ]);
    }

    // === Wire Format ===

    #[test]
    fn test_int_zero_is_single_byte() {
        assert_eq!(pack(&[TupleElement::Int(0)]), vec![0x14]);
    }

    #[test]
    fn test_int_one_layout() {
        assert_eq!(pack(&[TupleElement::Int(1)]), vec![0x15, 0x01]);
    }

    #[test]
    fn test_int_minus_one_layout() {
        assert_eq!(pack(&[TupleElement::Int(-1)]), vec![0x13, 0xFE]);
    }

    #[test]
    fn test_string_escaping_layout() {
        assert_eq!(
            pack(&[TupleElement::Bytes(vec![0x61, 0x00, 0x62])]),
            vec![0x01, 0x61, 0x00, 0xFF, 0x62, 0x00]
        );
    }

    #[test]
    fn test_null_escaped_only_inside_nested() {
        assert_eq!(pack(&[TupleElement::Null]), vec![0x00]);
        assert_eq!(
            pack(&[TupleElement::Nested(vec![TupleElement::Null])]),
            vec![0x05, 0x00, 0xFF, 0x00]
        );
    }

    // === Ordering ===

    fn assert_byte_order_matches(a: Vec<TupleElement>, b: Vec<TupleElement>) {
        let (pa, pb) = (pack(&a), pack(&b));
        assert_eq!(
            compare(&a, &b),
            pa.cmp(&pb),
            "semantic and byte order disagree for {:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_prefix_sorts_before_extension() {
        let short = vec![TupleElement::Int(1)];
        let long = vec![TupleElement::Int(1), TupleElement::String("a".into())];
        assert!(pack(&short) < pack(&long));
        assert_byte_order_matches(short, long);
    }

    #[test]
    fn test_string_value_order() {
        let a = vec![TupleElement::Int(1), TupleElement::String("a".into())];
        let b = vec![TupleElement::Int(1), TupleElement::String("b".into())];
        assert!(pack(&a) < pack(&b));
    }

    #[test]
    fn test_int_order_across_signs() {
        let values = [
            i64::MIN,
            -65536,
            -256,
            -2,
            -1,
            0,
            1,
            255,
            256,
            65535,
            i64::MAX,
        ];
        for pair in values.windows(2) {
            assert_byte_order_matches(
                vec![TupleElement::Int(pair[0])],
                vec![TupleElement::Int(pair[1])],
            );
            assert!(
                pack(&[TupleElement::Int(pair[0])]) < pack(&[TupleElement::Int(pair[1])]),
                "{} should encode below {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_double_order() {
        let values = [
            f64::NEG_INFINITY,
            -1.0e100,
            -1.0,
            -0.0,
            0.0,
            f64::MIN_POSITIVE,
            1.0,
            1.0e100,
            f64::INFINITY,
        ];
        for pair in values.windows(2) {
            let lo = pack(&[TupleElement::Double(pair[0])]);
            let hi = pack(&[TupleElement::Double(pair[1])]);
            assert!(lo <= hi, "{} should not encode above {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_bytes_with_nul_order() {
        // Escaping must not reorder byte strings around embedded NULs.
        let a = vec![TupleElement::Bytes(vec![0x00])];
        let b = vec![TupleElement::Bytes(vec![0x00, 0x00])];
        let c = vec![TupleElement::Bytes(vec![0x01])];
        assert_byte_order_matches(a.clone(), b.clone());
        assert_byte_order_matches(b, c.clone());
        assert_byte_order_matches(a, c);
    }

    #[test]
    fn test_nested_order() {
        let empty = vec![TupleElement::Nested(vec![])];
        let one = vec![TupleElement::Nested(vec![TupleElement::Null])];
        let two = vec![TupleElement::Nested(vec![TupleElement::Int(5)])];
        assert_byte_order_matches(empty.clone(), one.clone());
        assert_byte_order_matches(one, two.clone());
        assert_byte_order_matches(empty, two);
    }

    // === Decode Errors ===

    #[test]
    fn test_unknown_tag() {
        let result = unpack(&[0x99]);
        assert_eq!(
            result,
            Err(TupleError::UnknownTag {
                tag: 0x99,
                offset: 0
            })
        );
    }

    #[test]
    fn test_truncated_string() {
        // String tag with no terminator.
        let result = unpack(&[0x02, 0x61]);
        assert!(matches!(result, Err(TupleError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_truncated_double() {
        let result = unpack(&[0x21, 0x00, 0x00]);
        assert!(matches!(result, Err(TupleError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_truncated_int() {
        let result = unpack(&[0x16, 0x01]);
        assert!(matches!(result, Err(TupleError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_truncated_nested() {
        let result = unpack(&[0x05, 0x15, 0x01]);
        assert!(matches!(result, Err(TupleError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_invalid_utf8_in_string() {
        let result = unpack(&[0x02, 0xC3, 0x28, 0x00]);
        assert_eq!(result, Err(TupleError::InvalidUtf8 { offset: 0 }));
    }

    #[test]
    fn test_positive_int_overflow() {
        // 8-byte positive integer above i64::MAX.
        let mut input = vec![0x1C];
        input.extend_from_slice(&u64::MAX.to_be_bytes());
        let result = unpack(&input);
        assert_eq!(result, Err(TupleError::IntOutOfRange { offset: 0 }));
    }

    #[test]
    fn test_negative_int_overflow() {
        // 8-byte negative integer below i64::MIN.
        let mut input = vec![0x0C];
        input.extend_from_slice(&0u64.to_be_bytes());
        let result = unpack(&input);
        assert_eq!(result, Err(TupleError::IntOutOfRange { offset: 0 }));
    }

    #[test]
    fn test_min_int_roundtrip_exact() {
        let packed = pack(&[TupleElement::Int(i64::MIN)]);
        assert_eq!(packed[0], 0x0C);
        assert_eq!(
            unpack(&packed).unwrap(),
            vec![TupleElement::Int(i64::MIN)]
        );
    }

    // === Ordering vs semantic comparison, exhaustive small matrix ===

    #[test]
    fn test_order_matrix() {
        let samples: Vec<Vec<TupleElement>> = vec![
            vec![],
            vec![TupleElement::Null],
            vec![TupleElement::Null, TupleElement::Null],
            vec![TupleElement::Bytes(vec![])],
            vec![TupleElement::Bytes(vec![0x00])],
            vec![TupleElement::Bytes(vec![0xFF])],
            vec![TupleElement::String("".into())],
            vec![TupleElement::String("a".into())],
            vec![TupleElement::Nested(vec![])],
            vec![TupleElement::Nested(vec![TupleElement::Null])],
            vec![TupleElement::Int(-300)],
            vec![TupleElement::Int(-1)],
            vec![TupleElement::Int(0)],
            vec![TupleElement::Int(1)],
            vec![TupleElement::Int(300)],
            vec![TupleElement::Double(-1.0)],
            vec![TupleElement::Double(2.5)],
            vec![TupleElement::Bool(false)],
            vec![TupleElement::Bool(true)],
            vec![TupleElement::Int(1), TupleElement::String("a".into())],
        ];

        for a in &samples {
            for b in &samples {
                let expected = compare(a, b);
                let actual = pack(a).cmp(&pack(b));
                assert_eq!(expected, actual, "order mismatch: {:?} vs {:?}", a, b);
                if expected == Ordering::Equal {
                    assert_eq!(pack(a), pack(b));
                }
            }
        }
    }
}
