//! Summary Statistics
//!
//! Aggregates repetition measurements (elapsed seconds, accuracies) into
//! population statistics. Every sample counts: repetitions are few and
//! each one is a full training run, so nothing is discarded as an outlier.

/// Summary statistics over a set of repetition measurements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation (divides by `n`, not `n - 1`)
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Number of samples
    pub sample_count: usize,
}

/// Compute population summary statistics.
///
/// An empty slice yields all-zero statistics.
///
/// # Examples
///
/// ```
/// # use mnistbench_stats::compute_summary;
/// let summary = compute_summary(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(summary.mean, 5.0);
/// assert_eq!(summary.std_dev, 2.0);
/// ```
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;

    // Population variance; a single sample has exactly zero spread
    let std_dev = if samples.len() < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    };

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SummaryStatistics {
        mean,
        std_dev,
        min,
        max,
        sample_count: samples.len(),
    }
}

impl SummaryStatistics {
    /// Coefficient of variation (relative stddev, in percent)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}
