//! Order-preserving tuple encoding for Tessera keys
//!
//! This crate encodes heterogeneous ordered sequences of [`TupleElement`]
//! values into byte strings with two guarantees:
//!
//! - **Round-trip exactness**: decoding recovers the original sequence,
//!   including element types.
//! - **Order preservation**: byte-wise comparison of two encodings matches
//!   the semantic ordering of the decoded tuples (type rank first, then
//!   value; nested sequences element-wise, then by length).
//!
//! The second guarantee is load-bearing: the storage engine executes every
//! range query by raw byte comparison, so keys built from tuples scan in
//! the order an application expects.
//!
//! ## Contract
//!
//! The wire layout is FROZEN. Each element is prefixed by a type tag byte;
//! variable-length elements (bytes, strings, nested tuples) are
//! NUL-terminated with embedded `0x00` bytes escaped as `0x00 0xFF`;
//! integers use a sign-and-magnitude scheme whose tag carries the byte
//! width so that ordering holds across the whole `i64` range.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod element;
mod error;
mod range;

pub use codec::{pack, unpack};
pub use element::{compare, compare_elements, TupleElement};
pub use error::TupleError;
pub use range::{range, strinc};
