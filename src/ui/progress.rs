// Fri Oct 16 2026 - Alex

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Run-wide progress bar. Clones share the same bar, so every worker can hold one.
#[derive(Clone)]
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn hidden(total: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total);
        Self { bar }
    }

    pub fn for_run(total: u64, visible: bool) -> Self {
        if visible {
            Self::new(total)
        } else {
            Self::hidden(total)
        }
    }

    pub fn increment(&self) {
        self.bar.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// The underlying bar, for writers that must not tear it.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
