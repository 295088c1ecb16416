// Fri Oct 16 2026 - Alex

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod sequence;
pub mod ui;
pub mod utils;

pub use config::{Config, Schedule};
pub use error::{CollatzError, CollatzResult};
pub use orchestrator::{Orchestrator, RangePartitioner, StatsAggregator};
pub use output::{FileSink, ResultSink, RunReport};
pub use sequence::{SequenceEngine, SequenceResult};
