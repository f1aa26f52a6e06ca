//! Core types for the Tessera client
//!
//! This crate defines the foundational pieces shared by the client layer:
//! - Error: the error hierarchy with kind classification
//! - API version bounds and validation
//! - NetworkOption / DatabaseOption: the recognized configuration options
//!   and their driver codes, with ordered builders
//! - NativeDriver: the trait seam over the store's native driver, plus the
//!   opaque cluster and database handles it hands out

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod error;
pub mod options;
pub mod version;

pub use driver::{ClusterHandle, DatabaseHandle, HandleToken, NativeDriver};
pub use error::{Error, ErrorKind, Result};
pub use options::{DatabaseOption, DatabaseOptions, NetworkOption, NetworkOptions, OptionValue};
pub use version::{validate_api_version, MAX_API_VERSION, MIN_API_VERSION};
