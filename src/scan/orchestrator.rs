use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::ScanConfig;
use crate::core::constants::defaults;
use crate::core::types::Wordlist;
use crate::reporting::logging;
use crate::scan::aggregator::{AggregateOutcome, DiscoverySink, ResultAggregator};
use crate::scan::probe::ProbeUrl;
use crate::scan::worker::{PoolState, Worker};
use crate::ui::progress::ProgressReporter;

/// What a finished scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Distinct discovered URLs in the order they were first seen
    pub found: Vec<String>,
    /// Requests attempted by all workers together
    pub requests: usize,
    /// Requests that failed at the transport level
    pub failures: usize,
    /// Requests the pool was expected to issue
    pub planned: usize,
    /// Last progress count displayed
    pub progress_shown: usize,
}

/// Runs a fixed-size worker pool over a wordlist.
pub struct Scanner<P: ProbeUrl + ?Sized> {
    config: ScanConfig,
    prober: Arc<P>,
}

impl<P: ProbeUrl + ?Sized + 'static> Scanner<P> {
    pub fn new(config: ScanConfig, prober: Arc<P>) -> Self {
        Self { config, prober }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every wordlist entry and wait until all output has been written.
    ///
    /// Both consumers are started before the first worker. Channels close
    /// only once every worker has been joined, and the consumers are then
    /// joined as well so nothing is printed after this returns.
    pub async fn run<S>(
        &self,
        wordlist: Wordlist,
        sink: S,
        progress: ProgressReporter,
    ) -> ScanReport
    where
        S: DiscoverySink + 'static,
    {
        let planned = self.config.planned_requests(wordlist.len());
        logging::log_scan_start(planned, self.config.workers);

        let (results_tx, results_rx) = mpsc::channel(defaults::CHANNEL_CAPACITY);
        let (progress_tx, progress_rx) = mpsc::channel(defaults::CHANNEL_CAPACITY);

        let aggregator = tokio::spawn(ResultAggregator::new(sink).run(results_rx));
        let reporter = tokio::spawn(progress.run(progress_rx));

        let state = Arc::new(PoolState::new(
            self.config.base_url.clone(),
            wordlist,
            self.config.distribution,
        ));
        let mut workers = JoinSet::new();
        for id in 0..self.config.workers {
            let worker = Worker::new(
                id,
                Arc::clone(&self.prober),
                Arc::clone(&state),
                results_tx.clone(),
                progress_tx.clone(),
            );
            workers.spawn(worker.run());
        }

        let mut requests = 0;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(issued) => requests += issued,
                Err(e) => logging::log_error("Worker task failed", Some(&e)),
            }
        }

        // Every worker is gone, dropping the last senders closes both channels
        drop(results_tx);
        drop(progress_tx);

        let (aggregated, shown) = futures::future::join(aggregator, reporter).await;
        let outcome = aggregated.unwrap_or_else(|e| {
            logging::log_error("Result aggregator failed", Some(&e));
            AggregateOutcome::default()
        });
        let progress_shown = shown.unwrap_or_else(|e| {
            logging::log_error("Progress reporter failed", Some(&e));
            0
        });

        ScanReport {
            found: outcome.found,
            requests,
            failures: outcome.failures,
            planned,
            progress_shown,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::error::{DirProbeError, Result};
    use crate::core::types::{Distribution, RequestFailure};
    use crate::ui::progress::ProgressMode;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 200 for paths ending in one of `hits`, transport error for `down`, 404 otherwise
    struct FakeServer {
        hits: Vec<&'static str>,
        down: Vec<&'static str>,
        requests: AtomicUsize,
    }

    impl FakeServer {
        fn new(hits: Vec<&'static str>, down: Vec<&'static str>) -> Self {
            Self {
                hits,
                down,
                requests: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProbeUrl for FakeServer {
        async fn probe(&self, url: &str) -> Result<u16> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.down.iter().any(|d| url.ends_with(d)) {
                return Err(DirProbeError::Request("connection refused".to_string()));
            }
            if self.hits.iter().any(|h| url.ends_with(h)) {
                Ok(200)
            } else {
                Ok(404)
            }
        }
    }

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<String>>>);

    impl SharedSink {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl DiscoverySink for SharedSink {
        fn found(&mut self, url: &str) {
            self.0.lock().unwrap().push(format!("Found: {url}"));
        }

        fn request_failed(&mut self, failure: &RequestFailure) {
            self.0
                .lock()
                .unwrap()
                .push(format!("Error making request to {}", failure.url));
        }
    }

    fn wordlist(entries: &[&str]) -> Wordlist {
        Wordlist::new(entries.iter().map(|s| s.to_string()).collect())
    }

    async fn scan(
        server: Arc<FakeServer>,
        config: ScanConfig,
        entries: &[&str],
        sink: SharedSink,
    ) -> ScanReport {
        let planned = config.planned_requests(entries.len());
        let progress = ProgressReporter::new(ProgressMode::Hidden, planned);
        Scanner::new(config, server)
            .run(wordlist(entries), sink, progress)
            .await
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run__full_mode_scenario() {
        let server = Arc::new(FakeServer::new(vec!["/admin"], vec![]));
        let sink = SharedSink::default();

        let report = scan(
            server.clone(),
            ScanConfig::new("http://x/", 2, Distribution::Full),
            &["admin", "login", "admin"],
            sink.clone(),
        )
        .await;

        assert_eq!(sink.lines(), vec!["Found: http://x/admin"]);
        assert_eq!(report.found, vec!["http://x/admin"]);
        assert_eq!(report.requests, 6);
        assert_eq!(report.planned, 6);
        assert_eq!(report.progress_shown, 6);
        assert_eq!(server.requests.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run__shared_mode_requests_each_entry_once() {
        let server = Arc::new(FakeServer::new(vec!["/admin", "/backup"], vec![]));
        let sink = SharedSink::default();
        let entries = ["admin", "login", "backup", "images", "css", "js", "api"];

        let report = scan(
            server.clone(),
            ScanConfig::new("http://x/", 3, Distribution::Shared),
            &entries,
            sink.clone(),
        )
        .await;

        assert_eq!(report.requests, entries.len());
        assert_eq!(report.progress_shown, entries.len());
        assert_eq!(server.requests.load(Ordering::SeqCst), entries.len());
        let mut found = report.found.clone();
        found.sort();
        assert_eq!(found, vec!["http://x/admin", "http://x/backup"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run__full_mode_issues_workers_times_entries() {
        let server = Arc::new(FakeServer::new(vec![], vec![]));
        let entries = ["a", "b", "c", "d", "e"];

        let report = scan(
            server.clone(),
            ScanConfig::new("http://x/", 4, Distribution::Full),
            &entries,
            SharedSink::default(),
        )
        .await;

        assert_eq!(report.requests, 20);
        assert_eq!(server.requests.load(Ordering::SeqCst), 20);
        assert!(report.found.is_empty());
    }

    #[tokio::test]
    async fn test_run__empty_wordlist_makes_no_requests() {
        let server = Arc::new(FakeServer::new(vec!["/admin"], vec![]));

        let report = scan(
            server.clone(),
            ScanConfig::new("http://x/", 5, Distribution::Full),
            &[],
            SharedSink::default(),
        )
        .await;

        assert_eq!(report, ScanReport::default());
        assert_eq!(server.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run__transport_failures_do_not_stop_the_scan() {
        let server = Arc::new(FakeServer::new(vec!["/admin"], vec!["/down"]));
        let sink = SharedSink::default();

        let report = scan(
            server,
            ScanConfig::new("http://x/", 2, Distribution::Shared),
            &["down", "admin", "login"],
            sink.clone(),
        )
        .await;

        assert_eq!(report.requests, 3);
        assert_eq!(report.failures, 1);
        assert_eq!(report.found, vec!["http://x/admin"]);
        assert_eq!(report.progress_shown, 3);
        assert!(
            sink.lines()
                .contains(&"Error making request to http://x/down".to_string())
        );
    }

    #[tokio::test]
    async fn test_run__works_with_trait_object_prober() {
        let server: Arc<dyn ProbeUrl> = Arc::new(FakeServer::new(vec!["/admin"], vec![]));
        let config = ScanConfig::new("http://x/", 1, Distribution::Shared);
        let progress = ProgressReporter::new(ProgressMode::Hidden, 1);

        let report = Scanner::new(config, server)
            .run(wordlist(&["admin"]), SharedSink::default(), progress)
            .await;

        assert_eq!(report.found, vec!["http://x/admin"]);
    }
}
