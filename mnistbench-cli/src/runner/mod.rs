//! Benchmark Runner
//!
//! Trains and evaluates every selected classifier on one train/test split,
//! then renders the results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Registration (selected from the registry)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Fresh instance per repetition, fit/predict/score, timing
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Population mean/std of accuracy and time
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report with the per-class breakdown
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Repetition loop and seed policy
//! - [`statistics`] - Summary statistics over repetitions
//! - [`report`] - Report building with classification metrics
//! - [`formatting`] - Human-readable output formatting

mod execution;
mod formatting;
mod report;
mod statistics;

pub use execution::{ClassifierExecution, Runner, RunnerConfig, SeedPolicy};
pub use formatting::{FormatOptions, format_human_output};
pub use report::build_report;
pub use statistics::{ClassifierStatistics, compute_statistics};

#[cfg(test)]
pub(crate) use execution::tests;

use mnistbench_core::{Registration, Split, Timer};
use mnistbench_report::Report;
use std::io::Write;

/// Run the full pipeline and write the formatted report to `out`.
///
/// An empty `registrations` slice does no work and writes nothing.
pub fn run_benchmarks(
    split: &Split,
    registrations: &[Registration],
    config: &RunnerConfig,
    format: &FormatOptions,
    out: &mut dyn Write,
) -> anyhow::Result<Report> {
    let timer = Timer::start();
    let executions = Runner::new(config.clone()).execute(split, registrations)?;
    let stats = compute_statistics(&executions);
    let report = build_report(&executions, &stats, split.test.labels(), timer.stop_secs())?;

    if !report.is_empty() {
        out.write_all(format_human_output(&report, format).as_bytes())?;
        out.flush()?;
    }
    tracing::info!(
        classifiers = report.results.len(),
        runs = report.total_runs(),
        seconds = report.total_duration_secs,
        "benchmark complete"
    );
    Ok(report)
}

