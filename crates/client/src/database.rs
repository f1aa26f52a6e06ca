//! Database wrapper: driver handle, key prefix, default transformers
//!
//! A [`Database`] owns nothing the driver doesn't: it combines an opaque
//! driver handle with a key prefix under which all operations are scoped
//! and the pair of transformers used to encode keys and values. The
//! transaction engine consumes the handle plus encoded bytes; this type
//! never performs I/O beyond option application at open time.

use crate::transformer::{RawBytes, Transformer};
use std::sync::Arc;
use tessera_core::{DatabaseHandle, DatabaseOptions, Error, NativeDriver, Result};
use tessera_tuple::strinc;
use tracing::debug;

/// An open database plus its key-space configuration
///
/// Cheap to clone and re-scope: [`Database::at`] and
/// [`Database::with_transformers`] derive new views sharing the same
/// driver handle.
#[derive(Clone)]
pub struct Database<K = RawBytes, V = RawBytes> {
    driver: Arc<dyn NativeDriver>,
    handle: DatabaseHandle,
    prefix: Vec<u8>,
    key_xf: K,
    value_xf: V,
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Database<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("handle", &self.handle)
            .field("prefix", &self.prefix)
            .field("key_xf", &self.key_xf)
            .field("value_xf", &self.value_xf)
            .finish_non_exhaustive()
    }
}

impl Database {
    pub(crate) fn new(driver: Arc<dyn NativeDriver>, handle: DatabaseHandle) -> Self {
        Database {
            driver,
            handle,
            prefix: Vec::new(),
            key_xf: RawBytes,
            value_xf: RawBytes,
        }
    }
}

impl<K, V> Database<K, V> {
    /// The driver-owned handle, for the transaction engine
    pub fn handle(&self) -> &DatabaseHandle {
        &self.handle
    }

    /// Key prefix this view is scoped under
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Derive a view scoped under `prefix ++ suffix`
    ///
    /// Scoping composes: `db.at(b"a/").at(b"b/")` is scoped under `a/b/`.
    pub fn at(&self, suffix: &[u8]) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut prefix = self.prefix.clone();
        prefix.extend_from_slice(suffix);
        Database {
            driver: self.driver.clone(),
            handle: self.handle.clone(),
            prefix,
            key_xf: self.key_xf.clone(),
            value_xf: self.value_xf.clone(),
        }
    }

    /// Derive a view using different key and value transformers
    pub fn with_transformers<K2, V2>(self, key_xf: K2, value_xf: V2) -> Database<K2, V2> {
        Database {
            driver: self.driver,
            handle: self.handle,
            prefix: self.prefix,
            key_xf,
            value_xf,
        }
    }

    /// Apply database options one at a time, in the supplied order
    ///
    /// Stops at — and surfaces verbatim — the first option the driver
    /// rejects; earlier options stay applied.
    pub fn set_options(&self, options: &DatabaseOptions) -> Result<()> {
        for option in options.entries() {
            let code = option.code();
            self.driver
                .set_database_option(&self.handle, code, &option.value())?;
            debug!(target: "tessera::client", code, "database option applied");
        }
        Ok(())
    }

    /// `(begin, end)` byte pair covering every key under this prefix
    ///
    /// Fails with a range error when the prefix is empty or all `0xFF`,
    /// since no exclusive upper bound exists.
    pub fn prefix_range(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let end = strinc(&self.prefix)?;
        Ok((self.prefix.clone(), end))
    }
}

impl<K: Transformer, V: Transformer> Database<K, V> {
    /// Encode an application key: prefix followed by the packed key
    pub fn encode_key(&self, key: &K::Value) -> Result<Vec<u8>> {
        let mut out = self.prefix.clone();
        out.extend_from_slice(&self.key_xf.pack(key)?);
        Ok(out)
    }

    /// Decode a stored key back to the application type
    ///
    /// Fails when `bytes` does not begin with this view's prefix.
    pub fn decode_key(&self, bytes: &[u8]) -> Result<K::Value> {
        let rest = bytes
            .strip_prefix(self.prefix.as_slice())
            .ok_or(Error::PrefixMismatch)?;
        self.key_xf.unpack(rest)
    }

    /// Encode an application value
    pub fn encode_value(&self, value: &V::Value) -> Result<Vec<u8>> {
        self.value_xf.pack(value)
    }

    /// Decode a stored value back to the application type
    pub fn decode_value(&self, bytes: &[u8]) -> Result<V::Value> {
        self.value_xf.unpack(bytes)
    }
}
