// Fri Oct 16 2026 - Alex

use anyhow::Context;
use clap::Parser;
use collatz_range::{
    config::{Config, Schedule},
    orchestrator::Orchestrator,
    ui::{Banner, RunProgress},
    utils::LoggingUtils,
};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Computes and stores the Collatz sequence of every number in a range", long_about = None)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    start: Option<u64>,

    #[arg(short, long)]
    end: Option<u64>,

    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[arg(long)]
    prefix: Option<String>,

    #[arg(long)]
    no_write: bool,

    #[arg(long)]
    resume: bool,

    #[arg(long)]
    per_number: bool,

    #[arg(long)]
    progress_interval: Option<u64>,

    /// Elements between "Number N: K steps so far" lines; 0 disables them.
    #[arg(long)]
    sequence_progress_interval: Option<u64>,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    summary: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    no_banner: bool,

    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(start) = self.start {
            config.range_start = start;
        }
        if let Some(end) = self.end {
            config.range_end = end;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(prefix) = self.prefix {
            config.file_prefix = prefix;
        }
        if let Some(interval) = self.progress_interval {
            config.progress_interval = interval;
        }
        if let Some(every) = self.sequence_progress_interval {
            config.sequence_progress_interval = every;
        }
        if self.summary.is_some() {
            config.summary_file = self.summary;
        }
        if self.no_write {
            config.write_sequences = false;
        }
        if self.resume {
            config.resume = true;
        }
        if self.per_number {
            config.schedule = Schedule::PerNumber;
        }
        if self.no_progress {
            config.show_progress = false;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let verbosity = args.verbose;
    let show_banner = !args.no_banner;
    let use_color = !args.no_color;
    let config = args.into_config()?;

    let progress = RunProgress::for_run(config.span(), config.show_progress);
    LoggingUtils::init(verbosity, Some(progress.bar()));

    config.validate().context("invalid configuration")?;

    if show_banner {
        Banner::for_run(config.effective_workers(), config.range_start, config.range_end)
            .with_color(use_color)
            .print();
    }

    println!("{} Running with {} CPU cores", "[*]".blue(), num_cpus::get());

    let summary_file = config.summary_file.clone();

    let report = Orchestrator::new(config)
        .with_progress(progress)
        .run()
        .context("collatz run failed")?;

    report.print();

    if let Some(path) = summary_file {
        match report.save_json(&path) {
            Ok(()) => println!("{} Summary saved to: {}", "[+]".green(), path.display()),
            Err(e) => eprintln!("{} Failed to save summary: {}", "[!]".red(), e),
        }
    }

    Ok(())
}
