/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values used across the scanner,
/// making them easier to maintain and modify.
/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status treated as a discovered path
    pub const OK: u16 = 200;
    /// HTTP 404 Not Found - resource not found
    pub const NOT_FOUND: u16 = 404;
}

/// Timeout constants
pub mod timeouts {
    /// Maximum accepted per-request timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
}

/// Default configuration values
pub mod defaults {
    /// Default number of workers in the pool
    pub const WORKERS: usize = 10;
    /// Upper bound for the worker count
    pub const MAX_WORKERS: usize = 1000;
    /// Capacity of the results and progress channels.
    ///
    /// tokio's bounded channel cannot be zero-sized, so a capacity of one is
    /// the closest thing to a rendezvous hand-off.
    pub const CHANNEL_CAPACITY: usize = 1;
}

/// Configuration file constants
pub mod config_files {
    /// File name looked up in the current directory and its parents
    pub const FILE_NAME: &str = ".dirprobe.toml";
    /// How many parent directories are searched for a config file
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}

/// Console message prefixes
pub mod messages {
    /// Prefix of a discovery line on stdout
    pub const FOUND_PREFIX: &str = "Found";
    /// Prefix of the progress line
    pub const PROGRESS_PREFIX: &str = "Progress";
    /// Prefix of a per-request transport failure line
    pub const REQUEST_ERROR_PREFIX: &str = "Error making request to";
}
