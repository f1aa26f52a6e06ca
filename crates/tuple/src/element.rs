//! Tuple element type and its semantic ordering
//!
//! [`TupleElement`] is a closed tagged union; the codec matches it
//! exhaustively in both directions, so adding a variant without updating
//! pack and unpack is a compile error.
//!
//! ### Equality and ordering
//!
//! - Equality follows IEEE-754 for doubles: `NaN != NaN`, `-0.0 == 0.0`.
//! - [`compare`] is a *total* order (doubles via [`f64::total_cmp`], so
//!   `-0.0 < 0.0` and NaN sorts by sign). This is exactly the order the
//!   byte encoding realizes; the two must never diverge.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One element of a tuple key
///
/// Different variants are never equal, even when the contained value
/// "looks" the same: `Int(1) != Double(1.0)` and
/// `Bytes(b"a") != String("a")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TupleElement {
    /// Absent value; sorts before everything else
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit IEEE-754 double
    Double(f64),
    /// Raw byte string
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Nested tuple; ordered element-wise, then by length
    Nested(Vec<TupleElement>),
}

// IEEE-754 equality for doubles; all other variants structural.
impl PartialEq for TupleElement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TupleElement::Null, TupleElement::Null) => true,
            (TupleElement::Bool(a), TupleElement::Bool(b)) => a == b,
            (TupleElement::Int(a), TupleElement::Int(b)) => a == b,
            (TupleElement::Double(a), TupleElement::Double(b)) => a == b,
            (TupleElement::Bytes(a), TupleElement::Bytes(b)) => a == b,
            (TupleElement::String(a), TupleElement::String(b)) => a == b,
            (TupleElement::Nested(a), TupleElement::Nested(b)) => a == b,
            _ => false,
        }
    }
}

impl TupleElement {
    /// Rank of the element's type in the overall ordering
    ///
    /// Null < Bytes < String < Nested < Int < Double < Bool, matching the
    /// relative order of the codec's type tag bytes.
    fn type_rank(&self) -> u8 {
        match self {
            TupleElement::Null => 0,
            TupleElement::Bytes(_) => 1,
            TupleElement::String(_) => 2,
            TupleElement::Nested(_) => 3,
            TupleElement::Int(_) => 4,
            TupleElement::Double(_) => 5,
            TupleElement::Bool(_) => 6,
        }
    }

    /// Name of the element's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            TupleElement::Null => "null",
            TupleElement::Bool(_) => "bool",
            TupleElement::Int(_) => "int",
            TupleElement::Double(_) => "double",
            TupleElement::Bytes(_) => "bytes",
            TupleElement::String(_) => "string",
            TupleElement::Nested(_) => "tuple",
        }
    }
}

/// Total order over two elements: type rank first, then value
pub fn compare_elements(a: &TupleElement, b: &TupleElement) -> Ordering {
    match (a, b) {
        (TupleElement::Null, TupleElement::Null) => Ordering::Equal,
        (TupleElement::Bool(x), TupleElement::Bool(y)) => x.cmp(y),
        (TupleElement::Int(x), TupleElement::Int(y)) => x.cmp(y),
        (TupleElement::Double(x), TupleElement::Double(y)) => x.total_cmp(y),
        (TupleElement::Bytes(x), TupleElement::Bytes(y)) => x.cmp(y),
        (TupleElement::String(x), TupleElement::String(y)) => x.cmp(y),
        (TupleElement::Nested(x), TupleElement::Nested(y)) => compare(x, y),
        _ => a.type_rank().cmp(&b.type_rank()),
    }
}

/// Total order over two tuples: element-wise, then by length
///
/// A tuple sorts before every strict extension of itself, so
/// `(1,) < (1, "a")`.
pub fn compare(a: &[TupleElement], b: &[TupleElement]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match compare_elements(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

impl From<i64> for TupleElement {
    fn from(v: i64) -> Self {
        TupleElement::Int(v)
    }
}

impl From<f64> for TupleElement {
    fn from(v: f64) -> Self {
        TupleElement::Double(v)
    }
}

impl From<bool> for TupleElement {
    fn from(v: bool) -> Self {
        TupleElement::Bool(v)
    }
}

impl From<&str> for TupleElement {
    fn from(v: &str) -> Self {
        TupleElement::String(v.to_string())
    }
}

impl From<String> for TupleElement {
    fn from(v: String) -> Self {
        TupleElement::String(v)
    }
}

impl From<Vec<u8>> for TupleElement {
    fn from(v: Vec<u8>) -> Self {
        TupleElement::Bytes(v)
    }
}

impl From<&[u8]> for TupleElement {
    fn from(v: &[u8]) -> Self {
        TupleElement::Bytes(v.to_vec())
    }
}

impl From<Vec<TupleElement>> for TupleElement {
    fn from(v: Vec<TupleElement>) -> Self {
        TupleElement::Nested(v)
    }
}
