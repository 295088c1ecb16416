// Fri Oct 16 2026 - Alex

use colored::*;
use indicatif::ProgressBar;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::time::Instant;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the logger. `RUST_LOG` wins when it is set; otherwise the
    /// coloured stderr logger is used at the level implied by `verbosity`.
    /// Lines are printed above `bar` when one is given.
    pub fn init(verbosity: u8, bar: Option<ProgressBar>) {
        if std::env::var_os("RUST_LOG").is_some() {
            init_from_env();
        } else {
            Self::init_logger(Self::level_from_verbosity(verbosity), bar);
        }
    }

    pub fn init_logger(level: LevelFilter, bar: Option<ProgressBar>) {
        let logger = Box::new(ColoredLogger::new(level, bar));
        if log::set_boxed_logger(logger).is_ok() {
            log::set_max_level(level);
        }
    }

    /// Info by default so worker start/finish and progress lines show up.
    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct ColoredLogger {
    level: LevelFilter,
    bar: Option<ProgressBar>,
}

impl ColoredLogger {
    fn new(level: LevelFilter, bar: Option<ProgressBar>) -> Self {
        Self { level, bar }
    }

    fn format_record(&self, record: &Record) -> String {
        let thread = std::thread::current();
        let origin = match thread.name() {
            Some(name) => format!("[{}]", name),
            None => format!("[{}]", record.target()),
        };

        format!("{} {} {}", self.format_level(record.level()), origin.dimmed(), record.args())
    }

    fn format_level(&self, level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        match &self.bar {
            // Clears the bar, prints, then redraws it underneath.
            Some(bar) => bar.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    fn flush(&self) {}
}

pub fn init_from_env() {
    let _ = env_logger::try_init();
}

pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}
