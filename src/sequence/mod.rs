// Fri Oct 16 2026 - Alex

pub mod engine;

pub use engine::{next, step, SequenceEngine, SequenceResult, TrajectoryStats};
