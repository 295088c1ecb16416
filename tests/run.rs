// Fri Oct 16 2026 - Alex

use collatz_range::config::{Config, Schedule};
use collatz_range::orchestrator::Orchestrator;
use collatz_range::sequence::SequenceEngine;
use std::fs;
use tempfile::TempDir;

fn config_in(dir: &TempDir, start: u64, end: u64, workers: usize) -> Config {
    Config::new()
        .with_range(start, end)
        .with_workers(workers)
        .with_output_dir(dir.path().join("collatz_results"))
        .with_progress(false)
}

#[test]
fn writes_one_file_per_number() {
    let tmp = TempDir::new().unwrap();
    let report = Orchestrator::new(config_in(&tmp, 1, 200, 4)).run().unwrap();

    assert_eq!(report.processed, 200);
    assert!(report.is_complete());

    let out = tmp.path().join("collatz_results");
    assert_eq!(fs::read_dir(&out).unwrap().count(), 200);
    assert_eq!(
        fs::read_to_string(out.join("collatz_6.txt")).unwrap(),
        "6\n3\n10\n5\n16\n8\n4\n2\n1\n"
    );
    assert_eq!(fs::read_to_string(out.join("collatz_1.txt")).unwrap(), "1\n");

    let seven: Vec<u64> = fs::read_to_string(out.join("collatz_7.txt"))
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(seven, SequenceEngine::new().generate(7).sequence);
}

#[test]
fn report_matches_single_worker_baseline() {
    let tmp = TempDir::new().unwrap();
    let baseline = Orchestrator::new(config_in(&tmp, 1, 1000, 1).with_write_sequences(false))
        .run()
        .unwrap();

    for schedule in [Schedule::Sequential, Schedule::PerNumber] {
        let tmp = TempDir::new().unwrap();
        let report = Orchestrator::new(config_in(&tmp, 1, 1000, 5).with_schedule(schedule))
            .run()
            .unwrap();
        assert_eq!(report.stats, baseline.stats);
    }

    // 871 takes 178 steps, the most below 1000.
    assert_eq!(baseline.stats.longest_steps_number, Some(871));
    assert_eq!(baseline.stats.longest_steps, 178);
}

#[test]
fn resume_loads_previous_artifacts() {
    let tmp = TempDir::new().unwrap();
    let first = Orchestrator::new(config_in(&tmp, 1, 50, 2)).run().unwrap();
    assert_eq!(first.resumed, 0);

    let second = Orchestrator::new(config_in(&tmp, 1, 80, 3).with_resume(true))
        .run()
        .unwrap();

    assert_eq!(second.resumed, 50);
    assert_eq!(second.processed, 80);
    assert_eq!(fs::read_dir(tmp.path().join("collatz_results")).unwrap().count(), 80);
}

#[test]
fn unwritable_output_is_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("collatz_results");
    fs::write(&blocker, "not a directory").unwrap();

    let report = Orchestrator::new(config_in(&tmp, 1, 20, 2)).run().unwrap();

    assert_eq!(report.processed, 20);
    assert_eq!(report.failed, (1..=20).collect::<Vec<u64>>());
    assert_eq!(report.stats.longest_steps_number, Some(18));
}

#[test]
fn summary_json_round_trips() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("summary.json");
    let report = Orchestrator::new(config_in(&tmp, 1, 10, 2)).run().unwrap();
    report.save_json(&path).unwrap();

    let loaded: collatz_range::RunReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.stats, report.stats);
    assert_eq!(loaded.workers.len(), 2);
}
