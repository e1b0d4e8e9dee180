#![warn(missing_docs)]
//! # MnistBench
//!
//! Trains and evaluates classifier implementations on one train/test split
//! of MNIST and reports accuracy, wall-clock time and a per-class breakdown.
//!
//! - **Fresh instances**: every repetition builds a new, independently
//!   seeded classifier from its registered prototype
//! - **Population statistics**: mean and standard deviation of accuracy and
//!   time over repetitions
//! - **Classification report**: precision, recall, F1 and support per class,
//!   from the final repetition
//! - **Built-in implementations**: multilayer perceptrons trained with SGD,
//!   momentum and Nesterov momentum
//!
//! ## Quick Start
//!
//! ```text
//! mnistbench sgd momentum nesterov
//! mnistbench -n 5 --seed 42 nesterov
//! ```
//!
//! ## Custom Classifiers
//!
//! ```ignore
//! use mnistbench::prelude::*;
//!
//! let registry = Registry::new().with(RegistryEntry {
//!     id: "linear",
//!     summary: "softmax regression",
//!     register: || Registration::new("softmax", MlpConfig::linear()),
//! });
//! ```

// Re-export core types
pub use mnistbench_core::{
    BenchError, Classifier, ClassifierError, ClassifierFactory, Dataset, DatasetError,
    DatasetSource, Registration, Registry, RegistryEntry, Split, train_test_split,
};

// Re-export data sources
pub use mnistbench_data::{Catalog, MNIST_DATASET, MnistDir, SYNTHETIC_DATASET, SyntheticBlobs};

// Re-export the built-in network
pub use mnistbench_nn::{Activation, MlpClassifier, MlpConfig, UpdateRule};

// Re-export report and stats
pub use mnistbench_report::{ClassifierReport, Report, RunRecord, format_classification_report};
pub use mnistbench_stats::{ClassificationReport, SummaryStatistics, classification_report};

// Re-export the runner
pub use mnistbench_cli::{
    BenchConfig, Cli, FormatOptions, RunnerConfig, SeedPolicy, Settings, UsageError, benchmark,
    builtin_registry, execute, run_benchmarks, run_with_cli,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Classifier, ClassifierError, ClassifierFactory, Dataset, MlpConfig, Registration,
        Registry, RegistryEntry, Settings, benchmark,
    };
}

/// Run the MnistBench CLI.
///
/// ```ignore
/// fn main() {
///     mnistbench::run().unwrap();
/// }
/// ```
pub use mnistbench_cli::run;
