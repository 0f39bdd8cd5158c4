//! Core types and utilities
//!
//! This module contains the fundamental building blocks shared by the
//! rest of the crate: constants, error types and the scan data model.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{DirProbeError, Result};
pub use types::{Discovery, Distribution, Finding, ProgressEvent, RequestFailure, Wordlist};
