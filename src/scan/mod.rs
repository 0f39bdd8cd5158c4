//! Concurrent path scanning
//!
//! The worker pool, the HTTP prober it drives, the result aggregator and
//! the orchestrator that wires them together over channels.

pub mod aggregator;
pub mod orchestrator;
pub mod probe;
pub mod worker;

// Re-export commonly used items
pub use aggregator::{AggregateOutcome, DiscoverySink, ResultAggregator};
pub use orchestrator::{ScanReport, Scanner};
pub use probe::{HttpProber, ProbeUrl};
pub use worker::{PoolState, Worker, candidate_url};
