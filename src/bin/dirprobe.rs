use clap::Parser;
use dirprobe::Wordlist;
use dirprobe::config::{CliConfig, Config, ScanConfig};
use dirprobe::discovery::{LoadWordlist, WordlistLoader};
use dirprobe::reporting::logging;
use dirprobe::scan::{HttpProber, ScanReport, Scanner};
use dirprobe::ui::{Cli, Console, ProgressMode, ProgressReporter, cli_to_config};

use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_dirprobe_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main scan logic extracted from main() for testing
pub async fn run_dirprobe_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    config.validate().inspect_err(|e| {
        logging::log_error("Invalid configuration", Some(e));
    })?;
    let scan_config = config.scan_config()?;
    logging::log_config_info(&config, &scan_config);

    // Nothing goes over the network before the wordlist is fully loaded
    let wordlist = load_wordlist(config.wordlist_path()?)?;

    let prober = Arc::new(HttpProber::from_config(&config)?);
    run_scan(scan_config, prober, wordlist, &output_settings).await;

    // A scan that ran to completion succeeds whether or not anything was found
    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(
    cli_config: &CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Settings for console output
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        show_progress,
    }
}

/// Read the wordlist, failing before any request is made
pub fn load_wordlist(path: &str) -> Result<Wordlist, Box<dyn std::error::Error>> {
    let path = Path::new(path);
    let wordlist = WordlistLoader::default().load(path).inspect_err(|e| {
        logging::log_error("Could not load wordlist", Some(e));
    })?;

    logging::log_wordlist_loaded(path, wordlist.len());
    Ok(wordlist)
}

/// Run the worker pool and print results as they come in
pub async fn run_scan(
    scan_config: ScanConfig,
    prober: Arc<HttpProber>,
    wordlist: Wordlist,
    output_settings: &OutputSettings,
) -> ScanReport {
    let planned = scan_config.planned_requests(wordlist.len());
    let mode = ProgressMode::detect(output_settings.show_progress);
    let progress = ProgressReporter::new(mode, planned);
    let console = Console::for_progress(mode, progress.bar());

    let start_time = std::time::Instant::now();
    let report = Scanner::new(scan_config, prober)
        .run(wordlist, console, progress)
        .await;

    logging::log_scan_complete(
        report.requests,
        report.found.len(),
        report.failures,
        start_time.elapsed().as_millis(),
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirprobe::Distribution;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_merge_config_no_config_flag() {
        let cli_config = CliConfig {
            no_config: true,
            workers: Some(3),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config).unwrap();

        assert_eq!(config.workers, Some(3));
        assert_eq!(config.distribution, Some(Distribution::Shared));
    }

    #[test]
    fn test_load_and_merge_config_with_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("dirprobe.toml");
        fs::write(
            &config_path,
            "base_url = \"http://from-file/\"\nworkers = 6\ndistribution = \"full\"\n",
        )
        .unwrap();

        let cli_config = CliConfig {
            config_file: Some(config_path.to_str().unwrap().to_string()),
            workers: Some(2),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://from-file/"));
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.distribution, Some(Distribution::Full));
    }

    #[test]
    fn test_load_and_merge_config_invalid_file() {
        let cli_config = CliConfig {
            config_file: Some("/nonexistent/config.toml".to_string()),
            ..Default::default()
        };

        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_setup_output_settings() {
        let config = Config::default();

        let settings = setup_output_settings(&CliConfig::default(), &config);
        assert!(settings.show_progress);
        assert!(!settings.verbose);

        let quiet = CliConfig {
            quiet: true,
            ..Default::default()
        };
        assert!(!setup_output_settings(&quiet, &config).show_progress);

        let no_progress = CliConfig {
            no_progress: true,
            ..Default::default()
        };
        assert!(!setup_output_settings(&no_progress, &config).show_progress);
    }

    #[test]
    fn test_load_wordlist_missing_file() {
        assert!(load_wordlist("/no/such/wordlist.txt").is_err());
    }
}
