//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{config_files, defaults, timeouts};
use crate::core::error::{DirProbeError, Result};
use crate::core::types::Distribution;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL every wordlist entry is appended to
    pub base_url: Option<String>,

    /// Path to the newline-delimited wordlist
    pub wordlist: Option<String>,

    /// Number of workers in the pool
    pub workers: Option<usize>,

    /// How wordlist entries are distributed across workers
    pub distribution: Option<Distribution>,

    /// Per-request timeout in seconds, no timeout when unset
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            wordlist: None,
            workers: Some(defaults::WORKERS),
            distribution: Some(Distribution::default()),
            timeout: None,
            user_agent: None,
            verbose: Some(false),
        }
    }
}

/// Fully resolved settings handed to the scan orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub base_url: String,
    pub workers: usize,
    pub distribution: Distribution,
}

impl ScanConfig {
    pub fn new(base_url: impl Into<String>, workers: usize, distribution: Distribution) -> Self {
        Self {
            base_url: base_url.into(),
            workers,
            distribution,
        }
    }

    /// Total number of requests the pool will issue for a wordlist of `entries` lines.
    pub fn planned_requests(&self, entries: usize) -> usize {
        self.distribution.planned_requests(self.workers, entries)
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for missing keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DirProbeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let loaded: Config = toml::from_str(&content)?;

        let config = Self::default().overlay(loaded);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        for path in Self::standard_locations() {
            if let Ok(config) = Self::load_from_file(&path) {
                log::debug!("Loaded config from {}", path.display());
                return config;
            }
        }

        Self::default()
    }

    fn standard_locations() -> Vec<PathBuf> {
        (0..=config_files::PARENT_SEARCH_DEPTH)
            .map(|depth| PathBuf::from(format!("{}{}", "../".repeat(depth), config_files::FILE_NAME)))
            .collect()
    }

    /// Fill the unset fields of `other` with the values from `self`
    fn overlay(self, other: Config) -> Config {
        Config {
            base_url: other.base_url.or(self.base_url),
            wordlist: other.wordlist.or(self.wordlist),
            workers: other.workers.or(self.workers),
            distribution: other.distribution.or(self.distribution),
            timeout: other.timeout.or(self.timeout),
            user_agent: other.user_agent.or(self.user_agent),
            verbose: other.verbose.or(self.verbose),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Target
        if let Some(ref base_url) = cli_config.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(ref wordlist) = cli_config.wordlist {
            self.wordlist = Some(wordlist.clone());
        }

        // Pool
        if let Some(workers) = cli_config.workers {
            self.workers = Some(workers);
        }
        if let Some(distribution) = cli_config.distribution {
            self.distribution = Some(distribution);
        }

        // Network
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Output
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get the per-request timeout, if one is configured
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or(defaults::WORKERS)
    }

    /// Resolve the settings the orchestrator needs, failing when a required value is missing
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let base_url = self.base_url.clone().ok_or_else(|| {
            DirProbeError::Config(
                "A base URL is required. Pass --url or set base_url in the config file."
                    .to_string(),
            )
        })?;

        Ok(ScanConfig::new(
            base_url,
            self.worker_count(),
            self.distribution.unwrap_or_default(),
        ))
    }

    /// Get the wordlist path, failing when none is configured
    pub fn wordlist_path(&self) -> Result<&str> {
        self.wordlist.as_deref().ok_or_else(|| {
            DirProbeError::Config(
                "A wordlist is required. Pass --wordlist or set wordlist in the config file."
                    .to_string(),
            )
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref base_url) = self.base_url {
            let parsed = reqwest::Url::parse(base_url).map_err(|e| {
                DirProbeError::Config(format!(
                    "Base URL '{base_url}' is not a valid absolute URL: {e}"
                ))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(DirProbeError::Config(format!(
                    "Base URL '{base_url}' must use http or https, got '{}'.",
                    parsed.scheme()
                )));
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(DirProbeError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers > defaults::MAX_WORKERS {
                return Err(DirProbeError::Config(format!(
                    "Worker count of {workers} is extremely high. Expected at most {}.",
                    defaults::MAX_WORKERS
                )));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(DirProbeError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(DirProbeError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref wordlist) = self.wordlist {
            if wordlist.is_empty() {
                return Err(DirProbeError::InvalidArgument(
                    "Wordlist path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Target
    pub base_url: Option<String>, // --url
    pub wordlist: Option<String>, // --wordlist

    // Pool
    pub workers: Option<usize>,               // --concurrency
    pub distribution: Option<Distribution>,   // --mode

    // Network
    pub timeout: Option<u64>,        // --timeout
    pub user_agent: Option<String>,  // --user-agent

    // Output
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
