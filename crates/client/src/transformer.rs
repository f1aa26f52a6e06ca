//! Byte codec catalog for keys and values
//!
//! A [`Transformer`] is a pack/unpack pair mapping an application value
//! type to and from raw bytes, satisfying `unpack(pack(x)) == x` for every
//! representable `x`. Five built-ins ship here; applications implement the
//! trait for custom codecs. All built-ins are stateless unit structs and
//! can be shared freely.
//!
//! One transformer is chosen per key-space and one per value-space on a
//! [`crate::Database`]. Key transformers additionally matter for range
//! scans: [`Int32Be`] and [`TuplePack`] preserve ordering under byte
//! comparison, [`JsonText`] and [`Utf8`] do not in general.

use tessera_core::{Error, Result};
use tessera_tuple::TupleElement;

/// A pack/unpack codec pair for one application value type
///
/// # Round-trip Law
///
/// `unpack(&pack(x)?)? == x` for every `x` the codec's domain contains.
/// Codecs whose wire format cannot represent every input value (see
/// [`JsonText`]) document the domain restriction instead.
pub trait Transformer: Send + Sync {
    /// Application-side type this codec maps
    type Value;

    /// Encode a value to bytes
    fn pack(&self, value: &Self::Value) -> Result<Vec<u8>>;

    /// Decode bytes back to a value
    fn unpack(&self, bytes: &[u8]) -> Result<Self::Value>;
}

/// Big-endian 4-byte signed integer codec
///
/// Big-endian keeps numeric order aligned with byte order, so integer keys
/// scan in numeric order... as long as they share a sign. Negative keys
/// sort after positive ones under raw byte comparison; use [`TuplePack`]
/// when mixed-sign ordering matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int32Be;

impl Transformer for Int32Be {
    type Value = i32;

    fn pack(&self, value: &i32) -> Result<Vec<u8>> {
        Ok(value.to_be_bytes().to_vec())
    }

    fn unpack(&self, bytes: &[u8]) -> Result<i32> {
        let arr: [u8; 4] = bytes.try_into().map_err(|_| Error::UnexpectedWidth {
            expected: 4,
            actual: bytes.len(),
        })?;
        Ok(i32::from_be_bytes(arr))
    }
}

/// UTF-8 text codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl Transformer for Utf8 {
    type Value = String;

    fn pack(&self, value: &String) -> Result<Vec<u8>> {
        Ok(value.as_bytes().to_vec())
    }

    fn unpack(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidText)
    }
}

/// Canonical text serialization of arbitrary structured data
///
/// Round-trip is guaranteed only for data the serialization format can
/// represent: map keys are strings, and non-finite numbers have no
/// representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonText;

impl Transformer for JsonText {
    type Value = serde_json::Value;

    fn pack(&self, value: &serde_json::Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn unpack(&self, bytes: &[u8]) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Identity codec; bytes pass through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBytes;

impl Transformer for RawBytes {
    type Value = Vec<u8>;

    fn pack(&self, value: &Vec<u8>) -> Result<Vec<u8>> {
        Ok(value.clone())
    }

    fn unpack(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

/// Order-preserving tuple codec; delegates to `tessera-tuple`
#[derive(Debug, Clone, Copy, Default)]
pub struct TuplePack;

impl Transformer for TuplePack {
    type Value = Vec<TupleElement>;

    fn pack(&self, value: &Vec<TupleElement>) -> Result<Vec<u8>> {
        Ok(tessera_tuple::pack(value))
    }

    fn unpack(&self, bytes: &[u8]) -> Result<Vec<TupleElement>> {
        Ok(tessera_tuple::unpack(bytes)?)
    }
}
