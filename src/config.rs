// Fri Oct 16 2026 - Alex

use crate::error::{CollatzError, CollatzResult};
use crate::output::sink::{DEFAULT_FILE_PREFIX, DEFAULT_OUTPUT_DIR};
use crate::sequence::engine::DEFAULT_PROGRESS_EVERY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RANGE_END: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Each worker walks its partition one number at a time.
    #[default]
    Sequential,
    /// Numbers inside a partition are spread over a rayon pool.
    PerNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub range_start: u64,
    pub range_end: u64,
    pub workers: usize,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub write_sequences: bool,
    pub resume: bool,
    pub schedule: Schedule,
    pub progress_interval: u64,
    /// Elements between in-sequence progress lines; 0 turns them off.
    pub sequence_progress_interval: u64,
    pub show_progress: bool,
    pub summary_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range_start: 1,
            range_end: DEFAULT_RANGE_END,
            workers: num_cpus::get(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            write_sequences: true,
            resume: false,
            schedule: Schedule::Sequential,
            progress_interval: 1000,
            sequence_progress_interval: DEFAULT_PROGRESS_EVERY,
            show_progress: true,
            summary_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> CollatzResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> CollatzResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn with_range(mut self, start: u64, end: u64) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_file_prefix(mut self, prefix: &str) -> Self {
        self.file_prefix = prefix.to_string();
        self
    }

    pub fn with_write_sequences(mut self, enabled: bool) -> Self {
        self.write_sequences = enabled;
        self
    }

    pub fn with_resume(mut self, enabled: bool) -> Self {
        self.resume = enabled;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_sequence_progress_interval(mut self, every: u64) -> Self {
        self.sequence_progress_interval = every;
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn with_summary_file(mut self, path: Option<PathBuf>) -> Self {
        self.summary_file = path;
        self
    }

    pub fn span(&self) -> u64 {
        self.range_end.saturating_sub(self.range_start).saturating_add(1)
    }

    /// Worker count actually used: never more workers than numbers.
    pub fn effective_workers(&self) -> usize {
        let span = self.span();
        if (self.workers as u64) > span {
            span as usize
        } else {
            self.workers
        }
    }

    pub fn validate(&self) -> CollatzResult<()> {
        if self.range_start == 0 {
            return Err(CollatzError::ZeroStart(self.range_start));
        }
        if self.range_end < self.range_start {
            return Err(CollatzError::InvalidRange {
                start: self.range_start,
                end: self.range_end,
            });
        }
        if self.workers == 0 {
            return Err(CollatzError::NoWorkers);
        }
        if self.file_prefix.contains(|c: char| c == '/' || c == '\\') {
            return Err(CollatzError::InvalidConfig(format!(
                "file_prefix must not contain path separators: {:?}",
                self.file_prefix
            )));
        }
        if self.resume && !self.write_sequences {
            return Err(CollatzError::InvalidConfig(
                "resume needs write_sequences to be enabled".to_string(),
            ));
        }
        Ok(())
    }
}
