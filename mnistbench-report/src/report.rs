//! Report Data Structures

use mnistbench_stats::{ClassificationReport, SummaryStatistics};

/// Complete benchmark report, one entry per classifier in run order
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Per-classifier results
    pub results: Vec<ClassifierReport>,
    /// Wall-clock time of the whole run, in seconds
    pub total_duration_secs: f64,
}

impl Report {
    /// Total repetitions across all classifiers
    pub fn total_runs(&self) -> usize {
        self.results.iter().map(|r| r.runs.len()).sum()
    }

    /// Whether no classifier was benchmarked
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// One train + evaluate repetition
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Repetition index (1-based)
    pub repetition: usize,
    /// Seed handed to the fresh instance
    pub seed: u64,
    /// Wall-clock seconds for fit + predict + score
    pub elapsed_secs: f64,
    /// Test-set accuracy in [0, 1]
    pub accuracy: f64,
}

/// Aggregated results for one classifier
#[derive(Debug, Clone)]
pub struct ClassifierReport {
    /// Registered display name
    pub name: String,
    /// Every repetition, in order
    pub runs: Vec<RunRecord>,
    /// Accuracy across repetitions
    pub accuracy: SummaryStatistics,
    /// Elapsed seconds across repetitions
    pub time: SummaryStatistics,
    /// Per-class metrics from the final repetition's predictions only
    pub classification: ClassificationReport,
}
