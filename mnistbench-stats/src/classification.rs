//! Classification Metrics
//!
//! Accuracy, confusion matrix, and the per-class precision/recall/F1/support
//! table that accompanies every classifier in a benchmark report.
//!
//! Classes are the sorted union of labels seen in the true and predicted
//! vectors, so a class that is only ever predicted (never true) still shows
//! up with zero support.

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors from metric computation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// True and predicted label vectors differ in length
    #[error("Label length mismatch: {truth} true labels vs {predicted} predictions")]
    LengthMismatch {
        /// Number of true labels
        truth: usize,
        /// Number of predicted labels
        predicted: usize,
    },
}

/// Fraction of predictions equal to the true label.
///
/// Returns 0.0 for empty input. Extra elements in the longer slice are ignored;
/// use [`classification_report`] when lengths must be validated.
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();
    correct as f64 / n as f64
}

/// Confusion matrix: `counts[i][j]` is the number of samples whose true label is
/// `labels[i]` and whose predicted label is `labels[j]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Sorted class labels (row/column order)
    pub labels: Vec<usize>,
    /// Square count matrix
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Samples correctly classified as class at `idx`
    pub fn true_positives(&self, idx: usize) -> usize {
        self.counts[idx][idx]
    }

    /// Samples whose true class is at `idx` (row sum)
    pub fn support(&self, idx: usize) -> usize {
        self.counts[idx].iter().sum()
    }

    /// Samples predicted as class at `idx` (column sum)
    pub fn predicted(&self, idx: usize) -> usize {
        self.counts.iter().map(|row| row[idx]).sum()
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Build a confusion matrix over the sorted union of observed labels.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize]) -> Result<ConfusionMatrix, MetricsError> {
    if y_true.len() != y_pred.len() {
        return Err(MetricsError::LengthMismatch {
            truth: y_true.len(),
            predicted: y_pred.len(),
        });
    }

    let labels: Vec<usize> = y_true
        .iter()
        .chain(y_pred)
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let index_of = |label: usize| labels.binary_search(&label).unwrap_or_default();

    let mut counts = vec![vec![0usize; labels.len()]; labels.len()];
    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        counts[index_of(truth)][index_of(pred)] += 1;
    }

    Ok(ConfusionMatrix { labels, counts })
}

/// Metrics for a single class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    /// Class label
    pub label: usize,
    /// TP / (TP + FP); 0.0 when the class is never predicted
    pub precision: f64,
    /// TP / (TP + FN); 0.0 when the class never occurs
    pub recall: f64,
    /// Harmonic mean of precision and recall; 0.0 when both are 0
    pub f1: f64,
    /// Number of true samples of this class
    pub support: usize,
}

/// Averaged metrics across classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageMetrics {
    /// Averaged precision
    pub precision: f64,
    /// Averaged recall
    pub recall: f64,
    /// Averaged F1-score
    pub f1: f64,
    /// Total support
    pub support: usize,
}

/// Per-class precision/recall/F1/support plus accuracy and averages
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    /// Per-class rows in label order
    pub classes: Vec<ClassMetrics>,
    /// Overall accuracy
    pub accuracy: f64,
    /// Unweighted mean over classes
    pub macro_avg: AverageMetrics,
    /// Support-weighted mean over classes
    pub weighted_avg: AverageMetrics,
}

impl ClassificationReport {
    /// Total number of evaluated samples
    pub fn total_support(&self) -> usize {
        self.weighted_avg.support
    }

    /// Metrics for a specific class label
    pub fn class(&self, label: usize) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Compute a classification report from true and predicted labels.
pub fn classification_report(
    y_true: &[usize],
    y_pred: &[usize],
) -> Result<ClassificationReport, MetricsError> {
    let matrix = confusion_matrix(y_true, y_pred)?;

    let classes: Vec<ClassMetrics> = matrix
        .labels
        .iter()
        .enumerate()
        .map(|(idx, &label)| {
            let tp = matrix.true_positives(idx);
            let support = matrix.support(idx);
            let precision = ratio(tp, matrix.predicted(idx));
            let recall = ratio(tp, support);
            ClassMetrics {
                label,
                precision,
                recall,
                f1: f1_score(precision, recall),
                support,
            }
        })
        .collect();

    let total = matrix.total();
    let macro_avg = if classes.is_empty() {
        AverageMetrics::default()
    } else {
        let k = classes.len() as f64;
        AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / k,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / k,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / k,
            support: total,
        }
    };

    let weighted_avg = if total == 0 {
        AverageMetrics::default()
    } else {
        let weighted = |metric: fn(&ClassMetrics) -> f64| {
            classes
                .iter()
                .map(|c| metric(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        };
        AverageMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
            support: total,
        }
    };

    Ok(ClassificationReport {
        classes,
        accuracy: accuracy(y_true, y_pred),
        macro_avg,
        weighted_avg,
    })
}
