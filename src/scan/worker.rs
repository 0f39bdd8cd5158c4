use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

use crate::core::constants::http_status;
use crate::core::types::{Distribution, Finding, ProgressEvent, Wordlist};
use crate::reporting::logging;
use crate::scan::probe::{ProbeUrl, describe_failure};

/// State shared by every worker of one scan.
#[derive(Debug)]
pub struct PoolState {
    base_url: String,
    wordlist: Wordlist,
    distribution: Distribution,
    cursor: AtomicUsize,
    completed: AtomicUsize,
}

impl PoolState {
    pub fn new(base_url: impl Into<String>, wordlist: Wordlist, distribution: Distribution) -> Self {
        Self {
            base_url: base_url.into(),
            wordlist,
            distribution,
            cursor: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Index of the next entry a worker should request.
    ///
    /// `position` is the worker's own loop position and is only used in
    /// `Full` mode; `Shared` mode hands out each index exactly once.
    fn next_index(&self, position: &mut usize) -> Option<usize> {
        let index = match self.distribution {
            Distribution::Shared => self.cursor.fetch_add(1, Ordering::Relaxed),
            Distribution::Full => {
                let index = *position;
                *position += 1;
                index
            }
        };

        (index < self.wordlist.len()).then_some(index)
    }

    /// Record one finished request and return the new global count
    fn complete_one(&self) -> usize {
        self.completed.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }
}

/// Candidate URL for a wordlist entry: plain concatenation, no escaping.
pub fn candidate_url(base_url: &str, path: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + path.len());
    url.push_str(base_url);
    url.push_str(path);
    url
}

pub struct Worker<P: ProbeUrl + ?Sized> {
    id: usize,
    prober: Arc<P>,
    state: Arc<PoolState>,
    results: mpsc::Sender<Finding>,
    progress: mpsc::Sender<ProgressEvent>,
}

impl<P: ProbeUrl + ?Sized> Worker<P> {
    pub fn new(
        id: usize,
        prober: Arc<P>,
        state: Arc<PoolState>,
        results: mpsc::Sender<Finding>,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> Self {
        Self {
            id,
            prober,
            state,
            results,
            progress,
        }
    }

    /// Request entries until the wordlist is exhausted, returning how many requests were issued.
    ///
    /// Transport errors never stop the loop. The worker only stops early if
    /// one of the consumers has gone away.
    pub async fn run(self) -> usize {
        let mut position = 0;
        let mut issued = 0;

        while let Some(index) = self.state.next_index(&mut position) {
            let url = candidate_url(&self.state.base_url, &self.state.wordlist[index]);

            let finding = match self.prober.probe(&url).await {
                Ok(status) => {
                    logging::log_probe_result(&url, status);
                    (status == http_status::OK).then(|| Finding::hit(url))
                }
                Err(err) => {
                    let reason = describe_failure(&err);
                    logging::log_request_failure(&url, &reason);
                    Some(Finding::failed(url, reason))
                }
            };
            issued += 1;

            if let Some(finding) = finding {
                if self.results.send(finding).await.is_err() {
                    log::debug!("Worker {}: result channel closed, stopping", self.id);
                    break;
                }
            }

            let completed = self.state.complete_one();
            if self.progress.send(ProgressEvent { completed }).await.is_err() {
                log::debug!("Worker {}: progress channel closed, stopping", self.id);
                break;
            }
        }

        log::debug!("Worker {} finished after {issued} request(s)", self.id);
        issued
    }
}
