//! Classification Report Table
//!
//! Renders per-class precision/recall/F1/support in aligned columns:
//!
//! ```text
//!              precision    recall  f1-score   support
//!
//!            0      0.98      0.99      0.98      2300
//!            1      0.99      0.99      0.99      2600
//!
//!     accuracy                          0.98      4900
//!    macro avg      0.98      0.99      0.98      4900
//! weighted avg      0.98      0.99      0.98      4900
//! ```

use mnistbench_stats::{AverageMetrics, ClassificationReport};

/// Decimal places used when none are configured
pub const DEFAULT_DIGITS: usize = 2;

const COLUMN: usize = 9;
const HEADERS: [&str; 4] = ["precision", "recall", "f1-score", "support"];

fn average_row(out: &mut String, name: &str, avg: &AverageMetrics, width: usize, digits: usize) {
    out.push_str(&format!(
        "{:>width$} {:>col$.digits$} {:>col$.digits$} {:>col$.digits$} {:>col$}\n",
        name,
        avg.precision,
        avg.recall,
        avg.f1,
        avg.support,
        width = width,
        col = COLUMN,
        digits = digits,
    ));
}

/// Format a classification report as a text table with `digits` decimals.
pub fn format_classification_report(report: &ClassificationReport, digits: usize) -> String {
    let label_width = report
        .classes
        .iter()
        .map(|c| c.label.to_string().len())
        .max()
        .unwrap_or(0);
    let width = label_width.max("weighted avg".len());

    let mut out = String::new();
    out.push_str(&format!("{:>width$}", "", width = width));
    for header in HEADERS {
        out.push_str(&format!(" {:>col$}", header, col = COLUMN));
    }
    out.push_str("\n\n");

    for class in &report.classes {
        out.push_str(&format!(
            "{:>width$} {:>col$.digits$} {:>col$.digits$} {:>col$.digits$} {:>col$}\n",
            class.label,
            class.precision,
            class.recall,
            class.f1,
            class.support,
            width = width,
            col = COLUMN,
            digits = digits,
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "{:>width$} {:>col$} {:>col$} {:>col$.digits$} {:>col$}\n",
        "accuracy",
        "",
        "",
        report.accuracy,
        report.total_support(),
        width = width,
        col = COLUMN,
        digits = digits,
    ));
    average_row(&mut out, "macro avg", &report.macro_avg, width, digits);
    average_row(&mut out, "weighted avg", &report.weighted_avg, width, digits);

    out
}
