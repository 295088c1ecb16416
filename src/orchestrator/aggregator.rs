// Fri Oct 16 2026 - Alex

use crate::sequence::{SequenceResult, TrajectoryStats};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Extremal statistics over every trajectory folded in so far.
///
/// `merge` is associative and commutative. Equal step counts or peaks are
/// resolved in favour of the smaller starting number, so the final state never
/// depends on the order in which results arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsAggregator {
    pub longest_steps: u64,
    pub longest_steps_number: Option<u64>,
    pub largest_value: u64,
    pub largest_value_number: Option<u64>,
    pub observed: u64,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, result: &SequenceResult) {
        self.observe(result.summary());
    }

    pub fn observe(&mut self, stats: TrajectoryStats) {
        if improves(stats.steps, stats.start, self.longest_steps, self.longest_steps_number) {
            self.longest_steps = stats.steps;
            self.longest_steps_number = Some(stats.start);
        }
        if improves(stats.max_value, stats.start, self.largest_value, self.largest_value_number) {
            self.largest_value = stats.max_value;
            self.largest_value_number = Some(stats.start);
        }
        self.observed += 1;
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.absorb(other);
        self
    }

    pub fn absorb(&mut self, other: Self) {
        if let Some(number) = other.longest_steps_number {
            if improves(other.longest_steps, number, self.longest_steps, self.longest_steps_number) {
                self.longest_steps = other.longest_steps;
                self.longest_steps_number = Some(number);
            }
        }
        if let Some(number) = other.largest_value_number {
            if improves(other.largest_value, number, self.largest_value, self.largest_value_number) {
                self.largest_value = other.largest_value;
                self.largest_value_number = Some(number);
            }
        }
        self.observed += other.observed;
    }

    pub fn is_empty(&self) -> bool {
        self.observed == 0
    }
}

fn improves(value: u64, number: u64, current: u64, holder: Option<u64>) -> bool {
    match holder {
        None => true,
        Some(holder) => value > current || (value == current && number < holder),
    }
}

/// Lock-guarded aggregator for callers that update from several threads at once.
/// The lock is held only for the compare-and-replace.
#[derive(Debug, Default)]
pub struct SharedAggregator {
    inner: Mutex<StatsAggregator>,
}

impl SharedAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, result: &SequenceResult) {
        self.observe(result.summary());
    }

    pub fn observe(&self, stats: TrajectoryStats) {
        self.inner.lock().observe(stats);
    }

    pub fn absorb(&self, other: StatsAggregator) {
        self.inner.lock().absorb(other);
    }

    pub fn snapshot(&self) -> StatsAggregator {
        *self.inner.lock()
    }

    pub fn into_inner(self) -> StatsAggregator {
        self.inner.into_inner()
    }
}
