//! Client lifecycle and encoding layer for Tessera
//!
//! This crate sits between application code and the store's native driver.
//! It owns the three pieces of process-wide client state and the codecs
//! used to build keys and values:
//!
//! - [`VersionGate`]: locks one API version per process
//! - [`NetworkLifecycle`]: starts the driver's network thread exactly once
//!   and guarantees shutdown when the [`Client`] is dropped
//! - [`Client`] / [`Cluster`] / [`Database`]: handle construction, with
//!   blocking and non-blocking variants of every open path
//! - [`transformer`]: the byte codec catalog (fixed-width integer, text,
//!   structured text, raw, tuple)
//!
//! # Quick Start
//!
//! ```ignore
//! use tessera_client::{Client, transformer::TuplePack, transformer::RawBytes};
//!
//! let client = Client::new(driver);
//! client.set_api_version(510)?;
//! let db = client
//!     .open_sync(None, None)?
//!     .at(b"myapp/")
//!     .with_transformers(TuplePack, RawBytes);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod cluster;
mod database;
mod gate;
mod network;
pub mod testing;
pub mod transformer;

pub use client::Client;
pub use cluster::{Cluster, DEFAULT_DATABASE_NAME};
pub use database::Database;
pub use gate::VersionGate;
pub use network::{NetworkLifecycle, NetworkState};
pub use transformer::Transformer;
