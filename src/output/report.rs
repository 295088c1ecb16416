// Fri Oct 16 2026 - Alex

use crate::config::{Config, Schedule};
use crate::error::CollatzResult;
use crate::orchestrator::aggregator::StatsAggregator;
use crate::orchestrator::worker::WorkerReport;
use crate::utils::format_duration;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub range_start: u64,
    pub range_end: u64,
    pub schedule: Schedule,
    pub stats: StatsAggregator,
    pub processed: u64,
    pub resumed: u64,
    pub failed: Vec<u64>,
    pub wrapped: Vec<u64>,
    pub elapsed_ms: u64,
    pub workers: Vec<WorkerReport>,
}

impl RunReport {
    pub fn new(config: &Config, stats: StatsAggregator, workers: Vec<WorkerReport>, elapsed: Duration) -> Self {
        let mut failed: Vec<u64> = workers.iter().flat_map(|w| w.failed.iter().copied()).collect();
        let mut wrapped: Vec<u64> = workers.iter().flat_map(|w| w.wrapped.iter().copied()).collect();
        failed.sort_unstable();
        wrapped.sort_unstable();

        Self {
            range_start: config.range_start,
            range_end: config.range_end,
            schedule: config.schedule,
            stats,
            processed: workers.iter().map(|w| w.processed).sum(),
            resumed: workers.iter().map(|w| w.resumed).sum(),
            failed,
            wrapped,
            elapsed_ms: elapsed.as_millis() as u64,
            workers,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn longest_line(&self) -> String {
        match self.stats.longest_steps_number {
            Some(number) => format!(
                "Number with the longest sequence: {} (took {} steps)",
                number, self.stats.longest_steps
            ),
            None => "Number with the longest sequence: none".to_string(),
        }
    }

    pub fn largest_line(&self) -> String {
        match self.stats.largest_value_number {
            Some(number) => format!(
                "Largest value reached: {} (from starting number {})",
                self.stats.largest_value, number
            ),
            None => "Largest value reached: none".to_string(),
        }
    }

    pub fn print(&self) {
        println!();
        println!("{}", "=== COLLATZ CONJECTURE STATISTICS ===".cyan().bold());
        println!("{}", self.longest_line());
        println!("{}", self.largest_line());
        println!();

        println!(
            "{} {} numbers from {} to {} in {}",
            "[+]".green(),
            self.processed,
            self.range_start,
            self.range_end,
            format_duration(self.elapsed())
        );

        if self.resumed > 0 {
            println!("{} {} loaded from earlier runs", "[*]".blue(), self.resumed);
        }
        if !self.failed.is_empty() {
            println!(
                "{} {} sequence(s) could not be written",
                "[!]".red(),
                self.failed.len()
            );
        }
        if !self.wrapped.is_empty() {
            println!(
                "{} {} trajectory(ies) exceeded u64 and wrapped",
                "[!]".yellow(),
                self.wrapped.len()
            );
        }
    }

    pub fn save_json(&self, path: &Path) -> CollatzResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::partition::Partition;
    use crate::sequence::SequenceEngine;
    use tempfile::TempDir;

    fn sample_report() -> RunReport {
        let engine = SequenceEngine::new();
        let mut stats = StatsAggregator::new();
        for n in 1..=10 {
            stats.observe(engine.trajectory_stats(n));
        }

        let worker = WorkerReport {
            worker_id: 1,
            partition: Partition::new(1, 1, 10),
            stats,
            processed: 10,
            resumed: 2,
            failed: vec![4],
            wrapped: Vec::new(),
            elapsed_ms: 3,
        };

        RunReport::new(&Config::new().with_range(1, 10), stats, vec![worker], Duration::from_millis(5))
    }

    #[test]
    fn test_report_lines() {
        let report = sample_report();
        assert_eq!(report.longest_line(), "Number with the longest sequence: 9 (took 19 steps)");
        assert_eq!(report.largest_line(), "Largest value reached: 52 (from starting number 7)");
        assert_eq!(report.processed, 10);
        assert_eq!(report.resumed, 2);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_empty_report_lines() {
        let report = RunReport::new(&Config::new(), StatsAggregator::new(), Vec::new(), Duration::ZERO);
        assert_eq!(report.longest_line(), "Number with the longest sequence: none");
        assert!(report.is_complete());
    }

    #[test]
    fn test_save_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("summary.json");
        sample_report().save_json(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["stats"]["longest_steps_number"], 9);
        assert_eq!(value["stats"]["largest_value"], 52);
        assert_eq!(value["failed"][0], 4);
        assert_eq!(value["schedule"], "sequential");
    }
}
