use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Ordered, read-only sequence of candidate path segments.
///
/// Cloning is cheap: every clone shares the same backing slice, so all
/// workers read the identical sequence without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    entries: Arc<[String]>,
}

impl Wordlist {
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Index<usize> for Wordlist {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.entries[index]
    }
}

impl From<Vec<String>> for Wordlist {
    fn from(entries: Vec<String>) -> Self {
        Self::new(entries)
    }
}

/// How wordlist entries are handed out to the workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Workers pull indices from one shared cursor, every entry is requested once
    #[default]
    Shared,
    /// Every worker walks the complete wordlist, every entry is requested once per worker
    Full,
}

impl Distribution {
    /// Number of requests a pool of `workers` issues for `entries` wordlist entries.
    pub fn planned_requests(self, workers: usize, entries: usize) -> usize {
        match self {
            Distribution::Shared => entries,
            Distribution::Full => workers.saturating_mul(entries),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Shared => write!(f, "shared"),
            Distribution::Full => write!(f, "full"),
        }
    }
}

/// A candidate URL that answered with HTTP 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub url: String,
}

/// A candidate URL whose request failed before any status was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub url: String,
    pub reason: String,
}

/// Message sent from workers to the result aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Hit(Discovery),
    Failed(RequestFailure),
}

impl Finding {
    pub fn hit(url: impl Into<String>) -> Self {
        Finding::Hit(Discovery { url: url.into() })
    }

    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Finding::Failed(RequestFailure {
            url: url.into(),
            reason: reason.into(),
        })
    }

    pub fn url(&self) -> &str {
        match self {
            Finding::Hit(discovery) => &discovery.url,
            Finding::Failed(failure) => &failure.url,
        }
    }
}

/// Global completion count observed by a worker right after finishing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgressEvent {
    pub completed: usize,
}
