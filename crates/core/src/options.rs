//! Network and database configuration options
//!
//! Each option maps a name to the numeric code the native driver's
//! per-option setters expect, together with a typed value. Builders keep
//! options in the order the caller supplied them; the client applies them
//! one at a time and stops at the first option the driver rejects.
//!
//! ## Contract
//!
//! The codes are FROZEN for the supported API version range. Adding an
//! option is backward compatible; renumbering is not.

/// Value accompanying an option code on the driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Flag option, no payload
    None,
    /// Little-endian 64-bit integer payload
    Int(i64),
    /// UTF-8 string payload
    Str(String),
    /// Raw byte payload
    Bytes(Vec<u8>),
}

/// Network options, applied once before the network thread starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkOption {
    /// Enable client trace output into the given directory
    TraceEnable(String),
    /// Maximum size in bytes of a single trace file
    TraceRollSize(i64),
    /// Maximum total size in bytes of retained trace files
    TraceMaxLogsSize(i64),
    /// LogGroup field attached to trace events
    TraceLogGroup(String),
    /// Internal tuning knob, as a `name=value` pair
    Knob {
        /// Knob name
        name: String,
        /// Knob value
        value: String,
    },
    /// Path to the TLS certificate file
    TlsCertPath(String),
    /// Path to the TLS key file
    TlsKeyPath(String),
    /// Peer verification pattern for TLS connections
    TlsVerifyPeers(Vec<u8>),
    /// Path to an additional client library to load
    ExternalClientLibrary(String),
    /// Directory to scan for client libraries
    ExternalClientDirectory(String),
    /// Do not connect through the locally linked client
    DisableLocalClient,
}

impl NetworkOption {
    /// Driver option code
    pub fn code(&self) -> u32 {
        match self {
            NetworkOption::TraceEnable(_) => 30,
            NetworkOption::TraceRollSize(_) => 31,
            NetworkOption::TraceMaxLogsSize(_) => 32,
            NetworkOption::TraceLogGroup(_) => 33,
            NetworkOption::Knob { .. } => 40,
            NetworkOption::TlsCertPath(_) => 43,
            NetworkOption::TlsKeyPath(_) => 46,
            NetworkOption::TlsVerifyPeers(_) => 47,
            NetworkOption::ExternalClientLibrary(_) => 62,
            NetworkOption::ExternalClientDirectory(_) => 63,
            NetworkOption::DisableLocalClient => 64,
        }
    }

    /// Payload marshalled to the driver
    pub fn value(&self) -> OptionValue {
        match self {
            NetworkOption::TraceEnable(dir) => OptionValue::Str(dir.clone()),
            NetworkOption::TraceRollSize(n) => OptionValue::Int(*n),
            NetworkOption::TraceMaxLogsSize(n) => OptionValue::Int(*n),
            NetworkOption::TraceLogGroup(group) => OptionValue::Str(group.clone()),
            NetworkOption::Knob { name, value } => {
                OptionValue::Str(format!("{}={}", name, value))
            }
            NetworkOption::TlsCertPath(path) => OptionValue::Str(path.clone()),
            NetworkOption::TlsKeyPath(path) => OptionValue::Str(path.clone()),
            NetworkOption::TlsVerifyPeers(pattern) => OptionValue::Bytes(pattern.clone()),
            NetworkOption::ExternalClientLibrary(path) => OptionValue::Str(path.clone()),
            NetworkOption::ExternalClientDirectory(path) => OptionValue::Str(path.clone()),
            NetworkOption::DisableLocalClient => OptionValue::None,
        }
    }
}

/// Database options, applied when a database handle is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseOption {
    /// Number of client-side location cache entries
    LocationCacheSize(i64),
    /// Maximum number of outstanding watches
    MaxWatches(i64),
    /// Machine identifier attached to this client
    MachineId(String),
    /// Datacenter identifier attached to this client
    DatacenterId(String),
}

impl DatabaseOption {
    /// Driver option code
    pub fn code(&self) -> u32 {
        match self {
            DatabaseOption::LocationCacheSize(_) => 10,
            DatabaseOption::MaxWatches(_) => 20,
            DatabaseOption::MachineId(_) => 21,
            DatabaseOption::DatacenterId(_) => 22,
        }
    }

    /// Payload marshalled to the driver
    pub fn value(&self) -> OptionValue {
        match self {
            DatabaseOption::LocationCacheSize(n) => OptionValue::Int(*n),
            DatabaseOption::MaxWatches(n) => OptionValue::Int(*n),
            DatabaseOption::MachineId(id) => OptionValue::Str(id.clone()),
            DatabaseOption::DatacenterId(id) => OptionValue::Str(id.clone()),
        }
    }
}

/// Ordered collection of network options
///
/// Builder methods append; application order is exactly the call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkOptions {
    entries: Vec<NetworkOption>,
}

impl NetworkOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable tracing into `dir`
    pub fn trace_enable(mut self, dir: impl Into<String>) -> Self {
        self.entries.push(NetworkOption::TraceEnable(dir.into()));
        self
    }

    /// Cap the size of a single trace file
    pub fn trace_roll_size(mut self, bytes: i64) -> Self {
        self.entries.push(NetworkOption::TraceRollSize(bytes));
        self
    }

    /// Cap the total size of retained trace files
    pub fn trace_max_logs_size(mut self, bytes: i64) -> Self {
        self.entries.push(NetworkOption::TraceMaxLogsSize(bytes));
        self
    }

    /// Set the trace LogGroup field
    pub fn trace_log_group(mut self, group: impl Into<String>) -> Self {
        self.entries.push(NetworkOption::TraceLogGroup(group.into()));
        self
    }

    /// Set an internal tuning knob
    pub fn knob(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(NetworkOption::Knob {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Point the driver at a TLS certificate file
    pub fn tls_cert_path(mut self, path: impl Into<String>) -> Self {
        self.entries.push(NetworkOption::TlsCertPath(path.into()));
        self
    }

    /// Point the driver at a TLS key file
    pub fn tls_key_path(mut self, path: impl Into<String>) -> Self {
        self.entries.push(NetworkOption::TlsKeyPath(path.into()));
        self
    }

    /// Set the TLS peer verification pattern
    pub fn tls_verify_peers(mut self, pattern: impl Into<Vec<u8>>) -> Self {
        self.entries
            .push(NetworkOption::TlsVerifyPeers(pattern.into()));
        self
    }

    /// Load an additional client library
    pub fn external_client_library(mut self, path: impl Into<String>) -> Self {
        self.entries
            .push(NetworkOption::ExternalClientLibrary(path.into()));
        self
    }

    /// Scan a directory for client libraries
    pub fn external_client_directory(mut self, path: impl Into<String>) -> Self {
        self.entries
            .push(NetworkOption::ExternalClientDirectory(path.into()));
        self
    }

    /// Disable the locally linked client
    pub fn disable_local_client(mut self) -> Self {
        self.entries.push(NetworkOption::DisableLocalClient);
        self
    }

    /// Append an already-constructed option
    pub fn push(&mut self, option: NetworkOption) {
        self.entries.push(option);
    }

    /// Options in application order
    pub fn entries(&self) -> &[NetworkOption] {
        &self.entries
    }

    /// True when no options have been set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered collection of database options
///
/// Builder methods append; application order is exactly the call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseOptions {
    entries: Vec<DatabaseOption>,
}

impl DatabaseOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client location cache size
    pub fn location_cache_size(mut self, entries: i64) -> Self {
        self.entries
            .push(DatabaseOption::LocationCacheSize(entries));
        self
    }

    /// Cap the number of outstanding watches
    pub fn max_watches(mut self, watches: i64) -> Self {
        self.entries.push(DatabaseOption::MaxWatches(watches));
        self
    }

    /// Attach a machine identifier
    pub fn machine_id(mut self, id: impl Into<String>) -> Self {
        self.entries.push(DatabaseOption::MachineId(id.into()));
        self
    }

    /// Attach a datacenter identifier
    pub fn datacenter_id(mut self, id: impl Into<String>) -> Self {
        self.entries.push(DatabaseOption::DatacenterId(id.into()));
        self
    }

    /// Append an already-constructed option
    pub fn push(&mut self, option: DatabaseOption) {
        self.entries.push(option);
    }

    /// Options in application order
    pub fn entries(&self) -> &[DatabaseOption] {
        &self.entries
    }

    /// True when no options have been set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
