// Fri Oct 16 2026 - Alex

pub mod report;
pub mod sink;

pub use report::RunReport;
pub use sink::{FileSink, MemorySink, NullSink, ResultSink, SinkError};
