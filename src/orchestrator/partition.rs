// Fri Oct 16 2026 - Alex

use crate::error::{CollatzError, CollatzResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub worker_id: usize,
    pub start: u64,
    pub end: u64,
}

impl Partition {
    pub fn new(worker_id: usize, start: u64, end: u64) -> Self {
        Self { worker_id, start, end }
    }

    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            RangePartitioner::span(self.start, self.end)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn range(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

pub struct RangePartitioner;

impl RangePartitioner {
    /// Number of values in `[start, end]`, saturating at `u64::MAX`.
    /// An inverted pair counts as a single value; callers reject it first.
    pub fn span(start: u64, end: u64) -> u64 {
        end.saturating_sub(start).saturating_add(1)
    }

    /// Splits `[start, end]` into `worker_count` contiguous partitions of
    /// `span / worker_count` values each. The last partition ends at `end`
    /// and absorbs the remainder.
    pub fn partition(start: u64, end: u64, worker_count: usize) -> CollatzResult<Vec<Partition>> {
        if worker_count == 0 {
            return Err(CollatzError::NoWorkers);
        }
        if end < start {
            return Err(CollatzError::InvalidRange { start, end });
        }

        let span = Self::span(start, end);
        if worker_count as u64 > span {
            return Err(CollatzError::TooManyWorkers { workers: worker_count, span });
        }

        let size = span / worker_count as u64;
        let mut partitions = Vec::with_capacity(worker_count);

        for i in 0..worker_count {
            let offset = i as u64 * size;
            let part_start = start + offset;
            let part_end = if i == worker_count - 1 {
                end
            } else {
                part_start + size - 1
            };

            partitions.push(Partition::new(i + 1, part_start, part_end));
        }

        Ok(partitions)
    }
}
