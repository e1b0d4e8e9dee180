//! Output Formatting
//!
//! One block per classifier, in run order:
//!
//! ```text
//!
//! mlp.sgd
//! 	Accuracy: 97.62% ±0.11
//! 	Times:    41.37s ±0.52
//! 	Report:
//!              precision    recall  f1-score   support
//! ...
//! ```
//!
//! Accuracy is shown as a percentage, times in seconds. The `±` figure is
//! the population standard deviation over repetitions.

use mnistbench_report::{ClassifierReport, DEFAULT_DIGITS, Report, format_classification_report};

/// Presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Decimal places in the classification report
    pub digits: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
        }
    }
}

fn format_classifier(result: &ClassifierReport, options: &FormatOptions) -> String {
    let mut output = String::new();
    output.push('\n');
    output.push_str(&result.name);
    output.push('\n');
    output.push_str(&format!(
        "\tAccuracy: {:5.2}% ±{:4.2}\n",
        result.accuracy.mean * 100.0,
        result.accuracy.std_dev * 100.0
    ));
    output.push_str(&format!(
        "\tTimes:    {:5.2}s ±{:4.2}\n",
        result.time.mean, result.time.std_dev
    ));
    output.push_str("\tReport:\n");
    output.push_str(&format_classification_report(
        &result.classification,
        options.digits,
    ));
    output
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report, options: &FormatOptions) -> String {
    report
        .results
        .iter()
        .map(|result| format_classifier(result, options))
        .collect()
}
