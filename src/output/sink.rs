// Fri Oct 16 2026 - Alex

use crate::sequence::SequenceResult;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "collatz_results";
pub const DEFAULT_FILE_PREFIX: &str = "collatz_";

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        /// The number being stored when creation failed; `None` from `prepare`.
        number: Option<u64>,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write sequence for {number} to {path}: {source}")]
    Write {
        number: u64,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read sequence for {number} from {path}: {source}")]
    Read {
        number: u64,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Stored sequence for {number} at {path} is not a valid trajectory")]
    Parse { number: u64, path: PathBuf },
}

pub trait ResultSink: Send + Sync {
    fn name(&self) -> &'static str;

    /// Creates whatever the sink writes into. Safe to call any number of times
    /// from any thread.
    fn prepare(&self) -> Result<(), SinkError> {
        Ok(())
    }

    fn store(&self, result: &SequenceResult) -> Result<(), SinkError>;

    /// A previously stored result for `number`, if the sink kept one.
    fn load(&self, _number: u64) -> Result<Option<SequenceResult>, SinkError> {
        Ok(None)
    }
}

/// One text file per starting number, one value per line.
pub struct FileSink {
    dir: PathBuf,
    prefix: String,
    ready: AtomicBool,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_FILE_PREFIX.to_string(),
            ready: AtomicBool::new(false),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, number: u64) -> PathBuf {
        self.dir.join(format!("{}{}.txt", self.prefix, number))
    }

    fn ensure_dir(&self, number: Option<u64>) -> Result<(), SinkError> {
        if self.ready.load(Ordering::Acquire) {
            return Ok(());
        }

        // create_dir_all succeeds when the directory already exists, so racing
        // workers all end up Ok.
        fs::create_dir_all(&self.dir).map_err(|source| SinkError::CreateDir {
            number,
            path: self.dir.clone(),
            source,
        })?;

        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    fn write_sequence(path: &Path, sequence: &[u64]) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for value in sequence {
            writeln!(writer, "{}", value)?;
        }
        writer.flush()
    }

    fn read_sequence(path: &Path) -> io::Result<Option<Vec<u64>>> {
        let reader = BufReader::new(File::open(path)?);
        let mut values = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<u64>() {
                Ok(value) => values.push(value),
                Err(_) => return Ok(None),
            }
        }

        Ok(Some(values))
    }
}

impl ResultSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn prepare(&self) -> Result<(), SinkError> {
        self.ensure_dir(None)
    }

    fn store(&self, result: &SequenceResult) -> Result<(), SinkError> {
        self.ensure_dir(Some(result.start))?;

        let path = self.path_for(result.start);
        Self::write_sequence(&path, &result.sequence).map_err(|source| SinkError::Write {
            number: result.start,
            path,
            source,
        })
    }

    fn load(&self, number: u64) -> Result<Option<SequenceResult>, SinkError> {
        let path = self.path_for(number);

        let values = match Self::read_sequence(&path) {
            Ok(values) => values,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SinkError::Read { number, path, source }),
        };

        match values.and_then(SequenceResult::from_trajectory) {
            Some(result) if result.start == number => Ok(Some(result)),
            _ => Err(SinkError::Parse { number, path }),
        }
    }
}

/// Discards every result. Used when only the statistics are wanted.
pub struct NullSink;

impl ResultSink for NullSink {
    fn name(&self) -> &'static str {
        "null"
    }

    fn store(&self, _result: &SequenceResult) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps trajectories in memory, keyed by starting number.
#[derive(Default)]
pub struct MemorySink {
    stored: Mutex<BTreeMap<u64, Vec<u64>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stored.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.lock().is_empty()
    }

    pub fn get(&self, number: u64) -> Option<Vec<u64>> {
        self.stored.lock().get(&number).cloned()
    }

    pub fn numbers(&self) -> Vec<u64> {
        self.stored.lock().keys().copied().collect()
    }
}

impl ResultSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn store(&self, result: &SequenceResult) -> Result<(), SinkError> {
        self.stored.lock().insert(result.start, result.sequence.clone());
        Ok(())
    }

    fn load(&self, number: u64) -> Result<Option<SequenceResult>, SinkError> {
        Ok(self.get(number).and_then(SequenceResult::from_trajectory))
    }
}
