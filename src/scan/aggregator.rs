use rustc_hash::FxHashSet;
use tokio::sync::mpsc;

use crate::core::types::{Finding, RequestFailure};

/// Destination for what the aggregator decides to show.
pub trait DiscoverySink: Send {
    /// Called once per distinct discovered URL, in discovery order
    fn found(&mut self, url: &str);

    /// Called for every failed request
    fn request_failed(&mut self, failure: &RequestFailure);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregateOutcome {
    /// Distinct discovered URLs in the order they were first seen
    pub found: Vec<String>,
    pub failures: usize,
}

/// Deduplicates hits by exact URL and forwards them to a sink.
pub struct ResultAggregator<S: DiscoverySink> {
    sink: S,
    seen: FxHashSet<String>,
    outcome: AggregateOutcome,
}

impl<S: DiscoverySink> ResultAggregator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            seen: FxHashSet::default(),
            outcome: AggregateOutcome::default(),
        }
    }

    /// Handle one finding, returning true when it produced a new discovery
    pub fn record(&mut self, finding: Finding) -> bool {
        match finding {
            Finding::Hit(discovery) => {
                if self.seen.contains(&discovery.url) {
                    return false;
                }
                self.sink.found(&discovery.url);
                self.seen.insert(discovery.url.clone());
                self.outcome.found.push(discovery.url);
                true
            }
            Finding::Failed(failure) => {
                self.sink.request_failed(&failure);
                self.outcome.failures += 1;
                false
            }
        }
    }

    /// Consume findings until every sender is gone and the channel is drained
    pub async fn run(mut self, mut results: mpsc::Receiver<Finding>) -> AggregateOutcome {
        while let Some(finding) = results.recv().await {
            self.record(finding);
        }
        self.finish()
    }

    pub fn finish(self) -> AggregateOutcome {
        self.outcome
    }
}
