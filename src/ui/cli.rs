// Command-line interface definitions and parsing for dirprobe

use crate::config::CliConfig;
use crate::core::types::Distribution;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // Target
    /// Base URL that wordlist entries are appended to (e.g. http://example.com/)
    #[arg(short = 'u', long, value_name = "URL", help_heading = "Target")]
    pub url: Option<String>,

    /// Newline-delimited wordlist of path segments
    #[arg(short = 'w', long, value_name = "FILE", help_heading = "Target")]
    pub wordlist: Option<String>,

    // Worker Pool
    /// Number of workers (default: 10)
    #[arg(short = 'c', long, value_name = "COUNT", help_heading = "Worker Pool")]
    pub concurrency: Option<usize>,

    /// How entries are split between workers (default: shared)
    #[arg(long, value_enum, value_name = "MODE", help_heading = "Worker Pool")]
    pub mode: Option<Distribution>,

    // Network
    /// Per-request timeout in seconds (default: none)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Network")]
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Suppress progress output and logging
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable the progress line
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        base_url: cli.url.clone(),
        wordlist: cli.wordlist.clone(),
        workers: cli.concurrency,
        distribution: cli.mode,
        timeout: cli.timeout,
        user_agent: cli.user_agent.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "dirprobe",
            "-u",
            "http://x/",
            "-w",
            "words.txt",
            "-c",
            "2",
            "--mode",
            "full",
            "--timeout",
            "5",
            "--user-agent",
            "probe",
            "--no-progress",
            "--no-config",
            "-v",
        ])
        .unwrap();

        let cli_config = cli_to_config(&cli);
        assert_eq!(cli_config.base_url.as_deref(), Some("http://x/"));
        assert_eq!(cli_config.wordlist.as_deref(), Some("words.txt"));
        assert_eq!(cli_config.workers, Some(2));
        assert_eq!(cli_config.distribution, Some(Distribution::Full));
        assert_eq!(cli_config.timeout, Some(5));
        assert_eq!(cli_config.user_agent.as_deref(), Some("probe"));
        assert!(cli_config.no_progress);
        assert!(cli_config.no_config);
        assert!(cli_config.verbose);
        assert!(!cli_config.quiet);
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["dirprobe"]).unwrap();
        let cli_config = cli_to_config(&cli);

        assert!(cli_config.base_url.is_none());
        assert!(cli_config.workers.is_none());
        assert!(cli_config.distribution.is_none());
        assert!(cli_config.timeout.is_none());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["dirprobe", "--mode", "sometimes"]).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_concurrency() {
        assert!(Cli::try_parse_from(["dirprobe", "-c", "many"]).is_err());
    }
}
