//! dirprobe - discover paths on a web server from a wordlist
//!
//! A fixed-size pool of workers requests `<base URL><entry>` for the
//! entries of a wordlist and reports every URL that answers with HTTP 200,
//! while a second consumer keeps a progress line up to date.

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod scan;
pub mod ui;

// Re-export commonly used items
pub use crate::config::{CliConfig, Config, ScanConfig};
pub use crate::core::{
    DirProbeError, Discovery, Distribution, Finding, ProgressEvent, RequestFailure, Result,
    Wordlist,
};
pub use crate::discovery::{LoadWordlist, WordlistLoader};
pub use crate::scan::{HttpProber, ProbeUrl, ScanReport, Scanner};
