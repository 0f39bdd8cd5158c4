use std::fmt;

/// Error types for dirprobe operations
#[derive(Debug)]
pub enum DirProbeError {
    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Transport failure reported by a prober that is not backed by reqwest
    Request(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Invalid argument error
    InvalidArgument(String),

    /// Wordlist file could not be opened
    WordlistRead {
        path: String,
        source: std::io::Error,
    },

    /// Wordlist file failed while being read line by line
    WordlistScan {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for DirProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirProbeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DirProbeError::Http(err) => write!(f, "HTTP error: {err}"),
            DirProbeError::Request(msg) => write!(f, "Request error: {msg}"),
            DirProbeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            DirProbeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            DirProbeError::WordlistRead { path, source } => {
                write!(f, "Could not read wordlist file '{path}': {source}")
            }
            DirProbeError::WordlistScan { path, source } => {
                write!(f, "Could not scan wordlist file '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for DirProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirProbeError::Http(err) => Some(err),
            DirProbeError::TomlParsing(err) => Some(err),
            DirProbeError::WordlistRead { source, .. } => Some(source),
            DirProbeError::WordlistScan { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DirProbeError {
    fn from(err: reqwest::Error) -> Self {
        DirProbeError::Http(err)
    }
}

impl From<toml::de::Error> for DirProbeError {
    fn from(err: toml::de::Error) -> Self {
        DirProbeError::TomlParsing(err)
    }
}

/// Type alias for Results using DirProbeError
pub type Result<T> = std::result::Result<T, DirProbeError>;
