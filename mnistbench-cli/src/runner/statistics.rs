//! Statistics Computation
//!
//! Mean and population standard deviation of accuracy and elapsed time for
//! each classifier. A single repetition therefore reports a spread of zero.

use super::execution::ClassifierExecution;
use mnistbench_stats::{SummaryStatistics, compute_summary};

/// Summaries for one classifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifierStatistics {
    /// Accuracy in [0, 1] across repetitions
    pub accuracy: SummaryStatistics,
    /// Elapsed seconds across repetitions
    pub time: SummaryStatistics,
}

/// Compute statistics for every execution, in the same order
pub fn compute_statistics(executions: &[ClassifierExecution]) -> Vec<ClassifierStatistics> {
    executions
        .iter()
        .map(|execution| ClassifierStatistics {
            accuracy: compute_summary(&execution.accuracies()),
            time: compute_summary(&execution.times()),
        })
        .collect()
}
