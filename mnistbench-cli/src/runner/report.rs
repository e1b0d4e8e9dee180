//! Report Building
//!
//! Joins execution records with their statistics and the per-class
//! breakdown. The breakdown is computed from the final repetition's
//! predictions only; earlier repetitions contribute to the summaries alone.

use super::execution::ClassifierExecution;
use super::statistics::ClassifierStatistics;
use mnistbench_core::BenchError;
use mnistbench_report::{ClassifierReport, Report};
use mnistbench_stats::classification_report;
use ndarray::ArrayView1;

/// Build a complete Report from execution results
///
/// # Arguments
/// * `executions` - Execution records, one per classifier
/// * `stats` - Statistics computed from `executions`, in the same order
/// * `test_labels` - Ground-truth labels of the held-out partition
/// * `total_duration_secs` - Wall-clock time of the whole run
pub fn build_report(
    executions: &[ClassifierExecution],
    stats: &[ClassifierStatistics],
    test_labels: ArrayView1<'_, usize>,
    total_duration_secs: f64,
) -> Result<Report, BenchError> {
    let truth = test_labels.to_vec();

    let results = executions
        .iter()
        .zip(stats)
        .map(|(execution, stats)| -> Result<ClassifierReport, BenchError> {
            let classification = classification_report(&truth, &execution.last_predictions)?;
            Ok(ClassifierReport {
                name: execution.name.clone(),
                runs: execution.runs.clone(),
                accuracy: stats.accuracy.clone(),
                time: stats.time.clone(),
                classification,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report {
        results,
        total_duration_secs,
    })
}
