#![warn(missing_docs)]
//! MnistBench Statistical Engine
//!
//! Provides the numbers behind a benchmark report:
//! - Population summary statistics over repetitions (mean, std dev, extremes)
//! - Accuracy and confusion matrices for predicted labels
//! - Per-class precision, recall, F1-score and support

mod classification;
mod summary;

pub use classification::{
    AverageMetrics, ClassMetrics, ClassificationReport, ConfusionMatrix, MetricsError, accuracy,
    classification_report, confusion_matrix,
};
pub use summary::{SummaryStatistics, compute_summary};
