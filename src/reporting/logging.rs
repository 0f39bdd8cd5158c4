use crate::config::{Config, ScanConfig};
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, scan: &ScanConfig) {
    let timeout = config
        .timeout
        .map(|t| format!("{t}s"))
        .unwrap_or_else(|| "none".to_string());
    let user_agent = config.user_agent.as_deref().unwrap_or("default");

    info!(
        "Configuration: base_url={}, workers={}, mode={}",
        scan.base_url, scan.workers, scan.distribution
    );
    info!("HTTP: timeout={timeout}, user_agent={user_agent}");
}

/// Log wordlist loading information
pub fn log_wordlist_loaded(path: &Path, entries: usize) {
    info!("Loaded {entries} wordlist entries from {}", path.display());
}

/// Log scan start
pub fn log_scan_start(planned_requests: usize, workers: usize) {
    info!("Starting scan: {planned_requests} requests across {workers} worker(s)");
}

/// Log scan completion
pub fn log_scan_complete(requests: usize, found: usize, failures: usize, duration_ms: u128) {
    if failures == 0 {
        info!("Scan complete: {found} path(s) found in {requests} requests ({duration_ms}ms)");
    } else {
        warn!(
            "Scan complete: {found} path(s) found in {requests} requests, {failures} request(s) failed ({duration_ms}ms)"
        );
    }
}

/// Log the status code a candidate URL answered with
pub fn log_probe_result(url: &str, status: u16) {
    debug!("{url} -> {status}");
}

/// Log a transport failure for a candidate URL
pub fn log_request_failure(url: &str, reason: &str) {
    warn!("Request to {url} failed: {reason}");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
