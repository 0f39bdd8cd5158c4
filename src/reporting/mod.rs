//! Reporting and diagnostics
//!
//! Structured logging for configuration, wordlist loading and scan
//! lifecycle events.

pub mod logging;
