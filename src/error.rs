// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollatzError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: u64, end: u64 },
    #[error("Range must start at 1 or above, got {0}")]
    ZeroStart(u64),
    #[error("Worker count must be greater than 0")]
    NoWorkers,
    #[error("{workers} workers requested for a span of only {span} numbers")]
    TooManyWorkers { workers: usize, span: u64 },
    #[error("Failed to spawn worker {0}: {1}")]
    Spawn(usize, std::io::Error),
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CollatzResult<T> = Result<T, CollatzError>;
