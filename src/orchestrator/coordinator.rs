// Fri Oct 16 2026 - Alex

use crate::config::Config;
use crate::error::CollatzResult;
use crate::orchestrator::aggregator::StatsAggregator;
use crate::orchestrator::partition::RangePartitioner;
use crate::orchestrator::worker::{WorkerOptions, WorkerPool};
use crate::output::report::RunReport;
use crate::output::sink::{FileSink, NullSink, ResultSink};
use crate::ui::progress::RunProgress;
use crate::utils::logging::ScopedTimer;
use std::sync::Arc;
use std::time::Instant;

pub struct Orchestrator {
    config: Config,
    sink: Arc<dyn ResultSink>,
    progress: Option<RunProgress>,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        let sink: Arc<dyn ResultSink> = if config.write_sequences {
            Arc::new(FileSink::new(config.output_dir.clone()).with_prefix(&config.file_prefix))
        } else {
            Arc::new(NullSink)
        };

        Self {
            config,
            sink,
            progress: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_progress(mut self, progress: RunProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Partitions the range, runs one worker per partition, waits for all of
    /// them and folds their statistics into one report.
    ///
    /// Configuration problems fail here before any thread is started. Storage
    /// failures never fail the run; they are counted in the report.
    pub fn run(&self) -> CollatzResult<RunReport> {
        let _timer = ScopedTimer::new("collatz run");
        self.config.validate()?;

        let workers = self.config.effective_workers();
        if workers < self.config.workers {
            log::warn!(
                "Only {} numbers to process, using {} workers instead of {}",
                self.config.span(),
                workers,
                self.config.workers
            );
        }

        let partitions = RangePartitioner::partition(self.config.range_start, self.config.range_end, workers)?;
        log::info!(
            "Processing {} to {} with {} workers ({} sink)",
            self.config.range_start,
            self.config.range_end,
            partitions.len(),
            self.sink.name()
        );

        if let Err(e) = self.sink.prepare() {
            log::error!("{}", e);
        }

        let progress = self
            .progress
            .clone()
            .unwrap_or_else(|| RunProgress::hidden(self.config.span()));

        let options = WorkerOptions {
            write_sequences: self.config.write_sequences,
            resume: self.config.resume,
            progress_interval: self.config.progress_interval,
            sequence_progress_interval: self.config.sequence_progress_interval,
            schedule: self.config.schedule,
        };

        let started = Instant::now();
        let pool = WorkerPool::from_partitions(&partitions, self.sink.clone(), &progress, options);

        log::info!("Waiting for all sequences to complete...");
        let workers = pool.run()?;
        let elapsed = started.elapsed();

        let stats = workers
            .iter()
            .map(|w| w.stats)
            .fold(StatsAggregator::new(), StatsAggregator::merge);

        progress.finish("done");
        log::info!("All sequences completed in {:.2?}", elapsed);

        Ok(RunReport::new(&self.config, stats, workers, elapsed))
    }
}
