// Fri Oct 16 2026 - Alex

pub mod aggregator;
pub mod coordinator;
pub mod partition;
pub mod worker;

pub use aggregator::{SharedAggregator, StatsAggregator};
pub use coordinator::Orchestrator;
pub use partition::{Partition, RangePartitioner};
pub use worker::{RangeWorker, WorkerOptions, WorkerPool, WorkerReport};
