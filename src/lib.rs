//! Tessera client — lifecycle and key-encoding layer for the Tessera
//! transactional key-value store
//!
//! This crate prepares everything the transaction engine needs and nothing
//! it owns: it locks the process-wide API version, starts (once) and stops
//! (once) the native driver's background network thread, constructs
//! cluster and database handles, and encodes application values into
//! order-preserving keys.
//!
//! # Quick Start
//!
//! ```ignore
//! use tessera::{Client, DatabaseOptions};
//! use tessera::encoders::{TuplePack, RawBytes};
//!
//! let client = Client::new(driver);
//! client.set_api_version(510)?;
//!
//! let db = client
//!     .open_sync(None, Some(&DatabaseOptions::new().machine_id("m1")))?
//!     .at(b"myapp/")
//!     .with_transformers(TuplePack, RawBytes);
//!
//! let key = db.encode_key(&vec!["user".into(), 42_i64.into()])?;
//! ```
//!
//! # Architecture
//!
//! - [`tuple`]: order-preserving tuple codec (leaf, pure)
//! - `tessera-core`: errors, option catalogs, the [`NativeDriver`] seam
//! - `tessera-client`: version gate, network lifecycle, factories,
//!   transformer catalog
//!
//! The native driver itself — wire protocol, transactions, conflict
//! detection — lives behind [`NativeDriver`] and is not part of this
//! crate.

// Re-export the public API from the member crates.
pub use tessera_core::{
    ClusterHandle, DatabaseHandle, DatabaseOption, DatabaseOptions, Error, ErrorKind, HandleToken,
    NativeDriver, NetworkOption, NetworkOptions, OptionValue, Result, MAX_API_VERSION,
    MIN_API_VERSION,
};

pub use tessera_client::{
    Client, Cluster, Database, NetworkState, Transformer, DEFAULT_DATABASE_NAME,
};

/// The built-in transformer catalog
pub mod encoders {
    pub use tessera_client::transformer::{Int32Be, JsonText, RawBytes, TuplePack, Utf8};
}

/// Test double for the native driver
pub mod testing {
    pub use tessera_client::testing::{ClusterToken, DatabaseToken, RecordingDriver};
}

/// Order-preserving tuple codec
pub mod tuple {
    pub use tessera_tuple::{compare, pack, range, unpack, TupleElement, TupleError};
}

pub use tessera_tuple::strinc;
