#![warn(missing_docs)]
//! MnistBench Report - Result Model and Text Tables
//!
//! Holds everything a benchmark run produces and renders the per-class
//! classification table shown under each classifier.

mod report;
mod table;

pub use report::{ClassifierReport, Report, RunRecord};
pub use table::{DEFAULT_DIGITS, format_classification_report};
