//! Wordlist discovery and loading
//!
//! This module turns wordlist files on disk into the read-only
//! sequence of path segments shared by the worker pool.

pub mod wordlist;

// Re-export commonly used items
pub use wordlist::{LoadWordlist, WordlistLoader};
