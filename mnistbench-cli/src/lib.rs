#![warn(missing_docs)]
//! MnistBench CLI Library
//!
//! Command-line front end of the benchmark. Use `mnistbench::run()` (or
//! `mnistbench_cli::run()`) in a main function to get the full CLI:
//!
//! ```text
//! mnistbench [OPTIONS] [IMPLEMENTATIONS]...
//!
//! mnistbench sgd momentum nesterov
//! mnistbench -n 5 --seed 42 nesterov
//! mnistbench --dataset synthetic-blobs sgd
//! ```
//!
//! Settings are layered: command-line flags override `mnistbench.toml`, which
//! overrides built-in defaults. The report goes to stdout; logs and the
//! progress bar go to stderr.

mod config;
mod registry;
mod runner;

pub use config::*;
pub use registry::{builtin_registry, momentum, nesterov, sgd, usage_message};
pub use runner::{
    ClassifierExecution, ClassifierStatistics, FormatOptions, Runner, RunnerConfig, SeedPolicy,
    build_report, compute_statistics, format_human_output, run_benchmarks,
};

use anyhow::Context;
use clap::Parser;
use mnistbench_core::{DatasetSource, Registry, train_test_split};
use mnistbench_data::Catalog;
use mnistbench_report::Report;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// MnistBench CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mnistbench")]
#[command(author, version, about = "MnistBench - classifier benchmark on MNIST")]
pub struct Cli {
    /// Implementations to benchmark (see --list)
    pub implementations: Vec<String>,

    /// Repetitions per implementation
    #[arg(short = 'n', long)]
    pub runs: Option<usize>,

    /// Fixed base seed; repetition i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dataset name: mnist-original or synthetic-blobs
    #[arg(long)]
    pub dataset: Option<String>,

    /// Directory holding the MNIST IDX files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Held-out fraction in (0, 1)
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub split_seed: Option<u64>,

    /// Decimal places in the classification report
    #[arg(long)]
    pub digits: Option<usize>,

    /// Configuration file (discovered from the current directory if omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// List available implementations and exit
    #[arg(long)]
    pub list: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// No implementation was named on the command line
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct UsageError {
    /// Message shown to the user
    pub message: String,
}

/// Effective settings after layering CLI flags over the configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Repetitions per implementation
    pub repetitions: usize,
    /// Fixed base seed, if any
    pub seed: Option<u64>,
    /// Draw the progress bar
    pub progress: bool,
    /// Dataset name
    pub dataset: String,
    /// MNIST directory
    pub data_dir: PathBuf,
    /// Held-out fraction
    pub test_fraction: f64,
    /// Split shuffle seed
    pub split_seed: u64,
    /// Report decimals
    pub digits: usize,
}

impl Settings {
    /// Layer `cli` over `config`
    pub fn resolve(cli: &Cli, config: &BenchConfig) -> Self {
        Self {
            repetitions: cli.runs.unwrap_or(config.runner.repetitions),
            seed: cli.seed.or(config.runner.seed),
            progress: config.runner.progress && !cli.no_progress,
            dataset: cli
                .dataset
                .clone()
                .unwrap_or_else(|| config.data.dataset.clone()),
            data_dir: cli
                .data_dir
                .clone()
                .unwrap_or_else(|| config.data.directory.clone()),
            test_fraction: cli.test_fraction.unwrap_or(config.data.test_fraction),
            split_seed: cli.split_seed.unwrap_or(config.data.split_seed),
            digits: cli.digits.unwrap_or(config.output.digits),
        }
    }

    /// Runner settings
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            repetitions: self.repetitions,
            seed: SeedPolicy::from_option(self.seed),
            show_progress: self.progress,
        }
    }

    /// Presentation settings
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            digits: self.digits,
        }
    }
}

/// Run the CLI with arguments from the process command line
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the CLI with pre-parsed arguments
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let default_filter = if cli.verbose {
        "mnistbench=debug"
    } else {
        "mnistbench=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    execute(&cli, &builtin_registry(), &mut stdout.lock())
}

/// Dispatch parsed arguments against `registry`, writing the report to `out`.
///
/// A missing implementation name is reported before configuration or data
/// is touched.
pub fn execute(cli: &Cli, registry: &Registry, out: &mut dyn Write) -> anyhow::Result<()> {
    if cli.list {
        return list_implementations(registry, out);
    }
    if cli.implementations.is_empty() {
        return Err(UsageError {
            message: usage_message(registry),
        }
        .into());
    }

    let config = load_config(cli)?;
    let settings = Settings::resolve(cli, &config);
    let source = Catalog::new(&settings.data_dir);

    benchmark(&cli.implementations, &settings, registry, &source, out)?;
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<BenchConfig> {
    match &cli.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(BenchConfig::discover()?.unwrap_or_default()),
    }
}

/// Print every registered implementation with its summary
pub fn list_implementations(registry: &Registry, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "Available implementations:")?;
    let width = registry
        .entries()
        .iter()
        .map(|e| e.id.len())
        .max()
        .unwrap_or(0);
    for entry in registry.entries() {
        writeln!(out, "  {:<width$}  {}", entry.id, entry.summary, width = width)?;
    }
    Ok(())
}

/// Benchmark the implementations named in `implementations`.
///
/// Returns a [`UsageError`] before touching `source` when no implementation
/// is named. Tokens that match nothing in `registry` are skipped; when none
/// match, no data is loaded and nothing is written.
pub fn benchmark(
    implementations: &[String],
    settings: &Settings,
    registry: &Registry,
    source: &dyn DatasetSource,
    out: &mut dyn Write,
) -> anyhow::Result<Option<Report>> {
    if implementations.is_empty() {
        return Err(UsageError {
            message: usage_message(registry),
        }
        .into());
    }

    let runner_config = settings.runner_config();
    runner_config.validate()?;

    let registrations = registry.select(implementations);
    if registrations.is_empty() {
        tracing::warn!("no known implementation selected, nothing to benchmark");
        return Ok(None);
    }

    let dataset = source
        .fetch(&settings.dataset)
        .with_context(|| format!("failed to load dataset '{}'", settings.dataset))?;
    let split = train_test_split(&dataset, settings.test_fraction, settings.split_seed)?;

    let report = run_benchmarks(
        &split,
        &registrations,
        &runner_config,
        &settings.format_options(),
        out,
    )?;
    Ok(Some(report))
}
