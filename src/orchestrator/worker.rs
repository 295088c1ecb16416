// Fri Oct 16 2026 - Alex

use crate::config::Schedule;
use crate::error::{CollatzError, CollatzResult};
use crate::orchestrator::aggregator::{SharedAggregator, StatsAggregator};
use crate::orchestrator::partition::Partition;
use crate::output::sink::ResultSink;
use crate::sequence::engine::DEFAULT_PROGRESS_EVERY;
use crate::sequence::{SequenceEngine, TrajectoryStats};
use crate::ui::progress::RunProgress;
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct WorkerOptions {
    pub write_sequences: bool,
    pub resume: bool,
    pub progress_interval: u64,
    pub sequence_progress_interval: u64,
    pub schedule: Schedule,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            write_sequences: true,
            resume: false,
            progress_interval: 1000,
            sequence_progress_interval: DEFAULT_PROGRESS_EVERY,
            schedule: Schedule::Sequential,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub partition: Partition,
    pub stats: StatsAggregator,
    pub processed: u64,
    pub resumed: u64,
    pub failed: Vec<u64>,
    pub wrapped: Vec<u64>,
    pub elapsed_ms: u64,
}

impl WorkerReport {
    fn new(partition: Partition) -> Self {
        Self {
            worker_id: partition.worker_id,
            partition,
            stats: StatsAggregator::new(),
            processed: 0,
            resumed: 0,
            failed: Vec::new(),
            wrapped: Vec::new(),
            elapsed_ms: 0,
        }
    }

    fn record(&mut self, number: u64, outcome: NumberOutcome) {
        self.stats.observe(outcome.stats);
        self.processed += 1;
        if outcome.resumed {
            self.resumed += 1;
        }
        if outcome.failed {
            self.failed.push(number);
        }
        if outcome.stats.wrapped {
            self.wrapped.push(number);
        }
    }
}

struct NumberOutcome {
    stats: TrajectoryStats,
    resumed: bool,
    failed: bool,
}

/// Drives one partition: engine, then sink, then aggregator, per number.
pub struct RangeWorker {
    partition: Partition,
    engine: SequenceEngine,
    sink: Arc<dyn ResultSink>,
    progress: RunProgress,
    options: WorkerOptions,
}

impl RangeWorker {
    pub fn new(
        partition: Partition,
        sink: Arc<dyn ResultSink>,
        progress: RunProgress,
        options: WorkerOptions,
    ) -> Self {
        Self {
            partition,
            engine: SequenceEngine::new().with_progress_every(options.sequence_progress_interval),
            sink,
            progress,
            options,
        }
    }

    pub fn id(&self) -> usize {
        self.partition.worker_id
    }

    pub fn run(&self) -> WorkerReport {
        log::info!(
            "Worker {} processing range {} to {}",
            self.id(),
            self.partition.start,
            self.partition.end
        );

        let started = Instant::now();
        let mut report = match self.options.schedule {
            Schedule::Sequential => self.run_sequential(),
            Schedule::PerNumber => self.run_per_number(),
        };
        report.elapsed_ms = started.elapsed().as_millis() as u64;

        if !report.failed.is_empty() {
            log::warn!(
                "Worker {} could not store {} sequence(s)",
                self.id(),
                report.failed.len()
            );
        }
        log::info!(
            "Worker {} completed range {} to {} in {}ms",
            self.id(),
            self.partition.start,
            self.partition.end,
            report.elapsed_ms
        );

        report
    }

    fn run_sequential(&self) -> WorkerReport {
        let mut report = WorkerReport::new(self.partition);

        for number in self.partition.range() {
            let outcome = self.process_number(number);
            report.record(number, outcome);
            self.progress.increment();

            if self.options.progress_interval > 0 && number % self.options.progress_interval == 0 {
                log::info!("Worker {} completed up to {}", self.id(), number);
            }
        }

        report
    }

    fn run_per_number(&self) -> WorkerReport {
        let shared = SharedAggregator::new();
        let processed = AtomicU64::new(0);
        let resumed = AtomicU64::new(0);
        let failed = Mutex::new(Vec::new());
        let wrapped = Mutex::new(Vec::new());

        self.partition.range().into_par_iter().for_each(|number| {
            let outcome = self.process_number(number);
            shared.observe(outcome.stats);

            if outcome.resumed {
                resumed.fetch_add(1, Ordering::Relaxed);
            }
            if outcome.failed {
                failed.lock().push(number);
            }
            if outcome.stats.wrapped {
                wrapped.lock().push(number);
            }
            self.progress.increment();

            let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
            if self.options.progress_interval > 0 && done % self.options.progress_interval == 0 {
                log::info!("Worker {} processed {} numbers", self.id(), done);
            }
        });

        let mut failed = failed.into_inner();
        let mut wrapped = wrapped.into_inner();
        failed.sort_unstable();
        wrapped.sort_unstable();

        WorkerReport {
            worker_id: self.id(),
            partition: self.partition,
            stats: shared.into_inner(),
            processed: processed.into_inner(),
            resumed: resumed.into_inner(),
            failed,
            wrapped,
            elapsed_ms: 0,
        }
    }

    fn process_number(&self, number: u64) -> NumberOutcome {
        if self.options.resume {
            match self.sink.load(number) {
                Ok(Some(result)) => {
                    log::trace!("Skipping {} - already calculated", number);
                    return NumberOutcome {
                        stats: result.summary(),
                        resumed: true,
                        failed: false,
                    };
                }
                Ok(None) => {}
                Err(e) => log::warn!("Recomputing {}: {}", number, e),
            }
        }

        if !self.options.write_sequences {
            let stats = self.engine.trajectory_stats(number);
            self.note_wrapped(&stats);
            return NumberOutcome {
                stats,
                resumed: false,
                failed: false,
            };
        }

        let result = self.engine.generate(number);
        let stats = result.summary();
        self.note_wrapped(&stats);

        let failed = match self.sink.store(&result) {
            Ok(()) => false,
            Err(e) => {
                log::error!("Error writing sequence for {}: {}", number, e);
                true
            }
        };

        log::debug!("Completed sequence for {} with {} steps", number, stats.steps);

        NumberOutcome {
            stats,
            resumed: false,
            failed,
        }
    }

    fn note_wrapped(&self, stats: &TrajectoryStats) {
        if stats.wrapped {
            log::debug!(
                "Trajectory of {} wrapped past u64::MAX; reported values are modulo 2^64",
                stats.start
            );
        }
    }
}

/// One OS thread per worker, joined together.
pub struct WorkerPool {
    workers: Vec<RangeWorker>,
}

impl WorkerPool {
    pub fn new(workers: Vec<RangeWorker>) -> Self {
        Self { workers }
    }

    pub fn from_partitions(
        partitions: &[Partition],
        sink: Arc<dyn ResultSink>,
        progress: &RunProgress,
        options: WorkerOptions,
    ) -> Self {
        let workers = partitions
            .iter()
            .map(|p| RangeWorker::new(*p, sink.clone(), progress.clone(), options))
            .collect();

        Self::new(workers)
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Runs every worker to completion. Reports come back in partition order.
    pub fn run(self) -> CollatzResult<Vec<WorkerReport>> {
        let mut handles: Vec<(usize, JoinHandle<WorkerReport>)> = Vec::with_capacity(self.workers.len());
        let mut spawn_error = None;

        for worker in self.workers {
            let id = worker.id();
            let spawned = thread::Builder::new()
                .name(format!("collatz-worker-{}", id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => {
                    spawn_error = Some(CollatzError::Spawn(id, e));
                    break;
                }
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut panicked = None;

        for (id, handle) in handles {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    log::error!("Worker {} panicked", id);
                    panicked.get_or_insert(id);
                }
            }
        }

        if let Some(e) = spawn_error {
            return Err(e);
        }
        if let Some(id) = panicked {
            return Err(CollatzError::WorkerPanicked(id));
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sink::{MemorySink, SinkError};
    use crate::sequence::SequenceResult;
    use std::path::PathBuf;

    struct RejectingSink {
        reject: u64,
        inner: MemorySink,
    }

    impl ResultSink for RejectingSink {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn store(&self, result: &SequenceResult) -> Result<(), SinkError> {
            if result.start % self.reject == 0 {
                return Err(SinkError::Write {
                    number: result.start,
                    path: PathBuf::from("/dev/null/nope"),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "rejected"),
                });
            }
            self.inner.store(result)
        }
    }

    fn run_single(partition: Partition, sink: Arc<dyn ResultSink>, options: WorkerOptions) -> WorkerReport {
        RangeWorker::new(partition, sink, RunProgress::hidden(partition.len()), options).run()
    }

    #[test]
    fn test_sequential_worker_stores_every_number() {
        let sink = Arc::new(MemorySink::new());
        let report = run_single(Partition::new(1, 6, 10), sink.clone(), WorkerOptions::default());

        assert_eq!(report.processed, 5);
        assert_eq!(sink.numbers(), vec![6, 7, 8, 9, 10]);
        assert_eq!(report.stats.longest_steps_number, Some(9));
        assert_eq!(report.stats.largest_value_number, Some(7));
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_failures_are_isolated() {
        let sink = Arc::new(RejectingSink {
            reject: 3,
            inner: MemorySink::new(),
        });
        let report = run_single(Partition::new(1, 1, 10), sink.clone(), WorkerOptions::default());

        assert_eq!(report.processed, 10);
        assert_eq!(report.failed, vec![3, 6, 9]);
        assert_eq!(sink.inner.len(), 7);
        assert_eq!(report.stats.longest_steps_number, Some(9));
        assert_eq!(report.stats.observed, 10);
    }

    #[test]
    fn test_per_number_matches_sequential() {
        let partition = Partition::new(1, 1, 2000);
        let sequential = run_single(partition, Arc::new(MemorySink::new()), WorkerOptions::default());

        let sink = Arc::new(MemorySink::new());
        let options = WorkerOptions {
            schedule: Schedule::PerNumber,
            ..WorkerOptions::default()
        };
        let parallel = run_single(partition, sink.clone(), options);

        assert_eq!(parallel.stats, sequential.stats);
        assert_eq!(parallel.processed, 2000);
        assert_eq!(sink.len(), 2000);
    }

    #[test]
    fn test_resume_reuses_stored_sequences() {
        let sink = Arc::new(MemorySink::new());
        let engine = SequenceEngine::new();
        for n in [2u64, 4, 7] {
            sink.store(&engine.generate(n)).unwrap();
        }

        let options = WorkerOptions {
            resume: true,
            ..WorkerOptions::default()
        };
        let report = run_single(Partition::new(1, 1, 10), sink.clone(), options);

        assert_eq!(report.resumed, 3);
        assert_eq!(report.processed, 10);
        assert_eq!(sink.len(), 10);
        assert_eq!(report.stats.largest_value_number, Some(7));
    }

    #[test]
    fn test_stats_only_mode_skips_sink() {
        let sink = Arc::new(MemorySink::new());
        let options = WorkerOptions {
            write_sequences: false,
            ..WorkerOptions::default()
        };
        let report = run_single(Partition::new(1, 1, 10), sink.clone(), options);

        assert!(sink.is_empty());
        assert_eq!(report.stats.longest_steps, 19);
    }

    #[test]
    fn test_pool_runs_each_partition_once() {
        let sink: Arc<MemorySink> = Arc::new(MemorySink::new());
        let partitions = vec![Partition::new(1, 1, 5), Partition::new(2, 6, 10)];
        let progress = RunProgress::hidden(10);

        let pool = WorkerPool::from_partitions(&partitions, sink.clone(), &progress, WorkerOptions::default());
        assert_eq!(pool.size(), 2);

        let reports = pool.run().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].worker_id, 1);
        assert_eq!(reports[1].worker_id, 2);
        assert_eq!(sink.numbers(), (1..=10).collect::<Vec<_>>());
        assert_eq!(progress.position(), 10);
    }
}
