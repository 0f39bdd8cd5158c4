//! Console output for scan results

use indicatif::ProgressBar;

use crate::core::constants::messages;
use crate::core::types::RequestFailure;
use crate::scan::aggregator::DiscoverySink;
use crate::ui::progress::ProgressMode;

/// Line printed on stdout for a discovered URL
pub fn format_found(url: &str) -> String {
    format!("{}: {url}", messages::FOUND_PREFIX)
}

/// Line printed on stderr for a failed request
pub fn format_request_failure(failure: &RequestFailure) -> String {
    format!(
        "{} {}: {}",
        messages::REQUEST_ERROR_PREFIX,
        failure.url,
        failure.reason
    )
}

/// Prints discoveries to stdout and request failures to stderr.
///
/// When a progress bar is active the bar is suspended while a line is
/// printed so the two do not overwrite each other. A plain progress line
/// is ended before an error is written below it.
#[derive(Debug, Clone, Default)]
pub struct Console {
    bar: Option<ProgressBar>,
    breaks_progress_line: bool,
}

impl Console {
    pub fn new(bar: Option<ProgressBar>) -> Self {
        Self {
            bar,
            breaks_progress_line: false,
        }
    }

    /// Console sharing stderr with the given progress mode
    pub fn for_progress(mode: ProgressMode, bar: Option<ProgressBar>) -> Self {
        Self {
            bar,
            breaks_progress_line: mode == ProgressMode::Plain,
        }
    }

    /// Text written to stderr for an error line
    fn error_text(&self, line: &str) -> String {
        if self.bar.is_none() && self.breaks_progress_line {
            format!("\n{line}")
        } else {
            line.to_string()
        }
    }

    fn print_out(&self, line: &str) {
        match self.bar {
            Some(ref pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    fn print_err(&self, line: &str) {
        let text = self.error_text(line);
        match self.bar {
            Some(ref pb) => pb.suspend(|| eprintln!("{text}")),
            None => eprintln!("{text}"),
        }
    }
}

impl DiscoverySink for Console {
    fn found(&mut self, url: &str) {
        self.print_out(&format_found(url));
    }

    fn request_failed(&mut self, failure: &RequestFailure) {
        self.print_err(&format_request_failure(failure));
    }
}
