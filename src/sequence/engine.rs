// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};

/// One Collatz transition: halve even values, `3x + 1` for odd ones.
///
/// Arithmetic is fixed-width `u64` and `3x + 1` wraps modulo 2^64 in every
/// build profile. Starting values whose trajectory climbs past `u64::MAX`
/// therefore follow a different (wrong) trajectory. That boundary is kept as-is;
/// use [`step`] to find out whether a transition wrapped.
pub fn next(x: u64) -> u64 {
    step(x).0
}

/// Same transition as [`next`], also reporting whether `3x + 1` wrapped.
pub fn step(x: u64) -> (u64, bool) {
    if x % 2 == 0 {
        (x / 2, false)
    } else {
        let (tripled, mul_overflow) = x.overflowing_mul(3);
        let (value, add_overflow) = tripled.overflowing_add(1);
        (value, mul_overflow || add_overflow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceResult {
    pub start: u64,
    pub sequence: Vec<u64>,
    pub steps: u64,
    pub max_value: u64,
    pub wrapped: bool,
}

impl SequenceResult {
    /// Rebuilds a result from a stored trajectory. Returns `None` unless the
    /// values form a valid trajectory ending in exactly one 1.
    pub fn from_trajectory(sequence: Vec<u64>) -> Option<Self> {
        let start = *sequence.first()?;
        if start == 0 || *sequence.last()? != 1 {
            return None;
        }

        let mut wrapped = false;
        for pair in sequence.windows(2) {
            if pair[0] == 1 {
                return None;
            }
            let (value, overflowed) = step(pair[0]);
            if value != pair[1] {
                return None;
            }
            wrapped |= overflowed;
        }

        let max_value = sequence.iter().copied().max().unwrap_or(start);

        Some(Self {
            start,
            steps: (sequence.len() - 1) as u64,
            max_value,
            wrapped,
            sequence,
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn summary(&self) -> TrajectoryStats {
        TrajectoryStats {
            start: self.start,
            steps: self.steps,
            max_value: self.max_value,
            wrapped: self.wrapped,
        }
    }
}

/// Step count and peak of a trajectory without the trajectory itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryStats {
    pub start: u64,
    pub steps: u64,
    pub max_value: u64,
    pub wrapped: bool,
}

pub const DEFAULT_PROGRESS_EVERY: u64 = 10_000;

const CAPACITY_HINT: usize = 128;

fn log_progress(start: u64, elements: u64) {
    log::info!("Number {}: {} steps so far", start, elements);
}

#[derive(Debug, Clone)]
pub struct SequenceEngine {
    progress_every: u64,
}

impl SequenceEngine {
    pub fn new() -> Self {
        Self {
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    /// Reports progress once every `every` trajectory elements. 0 disables it.
    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every;
        self
    }

    /// Full trajectory from `n` down to 1.
    ///
    /// There is no step cap and no cycle detection: the loop only ends when 1
    /// is reached. `n` must be at least 1. Long trajectories log a progress
    /// line every `progress_every` elements.
    pub fn generate(&self, n: u64) -> SequenceResult {
        self.generate_with_progress(n, log_progress)
    }

    /// [`generate`](Self::generate) with a custom progress callback, called
    /// with the starting value and the number of elements so far.
    pub fn generate_with_progress<P>(&self, n: u64, on_progress: P) -> SequenceResult
    where
        P: FnMut(u64, u64),
    {
        let mut sequence = Vec::with_capacity(CAPACITY_HINT);
        sequence.push(n);

        let stats = self.walk(n, |value| sequence.push(value), on_progress);

        SequenceResult {
            start: n,
            steps: stats.steps,
            max_value: stats.max_value,
            wrapped: stats.wrapped,
            sequence,
        }
    }

    /// Same walk as [`generate`](Self::generate) without keeping the values.
    pub fn trajectory_stats(&self, n: u64) -> TrajectoryStats {
        self.walk(n, |_| {}, log_progress)
    }

    fn walk<V, P>(&self, n: u64, mut visit: V, mut on_progress: P) -> TrajectoryStats
    where
        V: FnMut(u64),
        P: FnMut(u64, u64),
    {
        assert!(n >= 1, "collatz trajectory is undefined for 0");

        let mut current = n;
        let mut steps = 0u64;
        let mut max_value = n;
        let mut wrapped = false;

        while current != 1 {
            let (value, overflowed) = step(current);
            wrapped |= overflowed;
            if value > max_value {
                max_value = value;
            }
            visit(value);
            steps += 1;
            current = value;

            let elements = steps + 1;
            if self.progress_every > 0 && elements % self.progress_every == 0 {
                on_progress(n, elements);
            }
        }

        TrajectoryStats {
            start: n,
            steps,
            max_value,
            wrapped,
        }
    }
}

impl Default for SequenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_even_and_odd() {
        assert_eq!(next(6), 3);
        assert_eq!(next(3), 10);
        assert_eq!(next(1), 4);
        assert_eq!(next(2), 1);
    }

    #[test]
    fn test_generate_six() {
        let result = SequenceEngine::new().generate(6);
        assert_eq!(result.sequence, vec![6, 3, 10, 5, 16, 8, 4, 2, 1]);
        assert_eq!(result.steps, 8);
        assert_eq!(result.max_value, 16);
        assert!(!result.wrapped);
    }

    #[test]
    fn test_generate_one() {
        let result = SequenceEngine::new().generate(1);
        assert_eq!(result.sequence, vec![1]);
        assert_eq!(result.steps, 0);
        assert_eq!(result.max_value, 1);
    }

    #[test]
    fn test_generate_seven() {
        let result = SequenceEngine::new().generate(7);
        assert_eq!(
            result.sequence,
            vec![7, 22, 11, 34, 17, 52, 26, 13, 40, 20, 10, 5, 16, 8, 4, 2, 1]
        );
        assert_eq!(result.steps, 16);
        assert_eq!(result.max_value, 52);
    }

    #[test]
    fn test_generate_twenty_seven() {
        let result = SequenceEngine::new().generate(27);
        assert_eq!(result.steps, 111);
        assert_eq!(result.max_value, 9232);
    }

    #[test]
    #[should_panic]
    fn test_generate_zero_panics() {
        SequenceEngine::new().generate(0);
    }

    #[test]
    fn test_progress_reported_every_n_elements() {
        let mut seen = Vec::new();
        let result = SequenceEngine::new()
            .with_progress_every(4)
            .generate_with_progress(27, |start, elements| seen.push((start, elements)));

        assert_eq!(result.len(), 112);
        assert_eq!(seen.len(), 28);
        assert_eq!(seen[0], (27, 4));
        assert_eq!(*seen.last().unwrap(), (27, 112));
    }

    #[test]
    fn test_progress_disabled_and_short_sequences() {
        let mut calls = 0;
        SequenceEngine::new()
            .with_progress_every(0)
            .generate_with_progress(27, |_, _| calls += 1);
        assert_eq!(calls, 0);

        SequenceEngine::new().generate_with_progress(27, |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_step_wraps_silently() {
        let (value, wrapped) = step(u64::MAX);
        assert!(wrapped);
        assert_eq!(value, u64::MAX - 1);
        assert_eq!(next(u64::MAX), u64::MAX - 1);

        let (value, wrapped) = step(u64::MAX - 1);
        assert!(!wrapped);
        assert_eq!(value, u64::MAX / 2);
    }

    #[test]
    fn test_from_trajectory() {
        let result = SequenceResult::from_trajectory(vec![6, 3, 10, 5, 16, 8, 4, 2, 1]).unwrap();
        assert_eq!(result.start, 6);
        assert_eq!(result.steps, 8);
        assert_eq!(result.max_value, 16);

        assert!(SequenceResult::from_trajectory(vec![]).is_none());
        assert!(SequenceResult::from_trajectory(vec![6, 3, 10]).is_none());
        assert!(SequenceResult::from_trajectory(vec![6, 4, 2, 1]).is_none());
        assert!(SequenceResult::from_trajectory(vec![1, 4, 2, 1]).is_none());
    }

    proptest! {
        #[test]
        fn prop_next_matches_rule(x in 0u64..(u64::MAX / 3)) {
            if x % 2 == 0 {
                prop_assert_eq!(next(x), x / 2);
            } else {
                prop_assert_eq!(next(x), 3 * x + 1);
            }
        }

        #[test]
        fn prop_generate_invariants(n in 1u64..200_000) {
            let result = SequenceEngine::new().generate(n);
            prop_assert_eq!(result.sequence[0], n);
            prop_assert_eq!(*result.sequence.last().unwrap(), 1);
            prop_assert_eq!(result.sequence.iter().filter(|&&v| v == 1).count(), 1);
            prop_assert_eq!(result.steps as usize, result.sequence.len() - 1);
            prop_assert_eq!(result.max_value, *result.sequence.iter().max().unwrap());
            prop_assert!(result.max_value >= n);
        }

        #[test]
        fn prop_stats_match_generate(n in 1u64..50_000) {
            let engine = SequenceEngine::new();
            prop_assert_eq!(engine.trajectory_stats(n), engine.generate(n).summary());
        }
    }
}
