//! Error types shared across the workspace

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while acquiring or partitioning a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// I/O failure reading a dataset file
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File header does not carry the expected IDX magic number
    #[error("Invalid magic number in {path}: expected {expected}, found {found}")]
    InvalidMagic {
        /// File being read
        path: PathBuf,
        /// Expected magic number
        expected: u32,
        /// Magic number found in the header
        found: u32,
    },

    /// Image and label files disagree on sample count
    #[error("Sample count mismatch: {images} images vs {labels} labels")]
    CountMismatch {
        /// Number of images
        images: usize,
        /// Number of labels
        labels: usize,
    },

    /// Feature rows and labels differ in length
    #[error("Shape mismatch: {rows} feature rows vs {labels} labels")]
    ShapeMismatch {
        /// Number of feature rows
        rows: usize,
        /// Number of labels
        labels: usize,
    },

    /// Split parameters cannot produce two non-empty partitions
    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    /// No source knows this dataset name
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

/// Errors raised by a classifier under benchmark
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// `predict`/`score` called before `fit`
    #[error("Classifier has not been fitted")]
    NotFitted,

    /// Feature rows and labels differ in length
    #[error("Shape mismatch: {rows} feature rows vs {labels} labels")]
    ShapeMismatch {
        /// Number of feature rows
        rows: usize,
        /// Number of labels
        labels: usize,
    },

    /// Feature width differs from the width seen during training
    #[error("Feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch {
        /// Width seen during `fit`
        expected: usize,
        /// Width of the offending input
        got: usize,
    },

    /// `fit` called with no samples
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Training produced a non-finite loss
    #[error("Training diverged at epoch {epoch} (loss = {loss})")]
    Diverged {
        /// Epoch index (1-based)
        epoch: usize,
        /// Offending loss value
        loss: f64,
    },
}

/// Errors that abort a benchmark run
#[derive(Debug, Error)]
pub enum BenchError {
    /// Dataset acquisition or split failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A classifier failed during fit, predict or score
    #[error("Classifier '{name}' failed on repetition {repetition}: {source}")]
    Classifier {
        /// Registered classifier name
        name: String,
        /// Repetition index (1-based)
        repetition: usize,
        /// Underlying classifier error
        #[source]
        source: ClassifierError,
    },

    /// Classification metrics could not be computed
    #[error(transparent)]
    Metrics(#[from] mnistbench_stats::MetricsError),

    /// Runner configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
