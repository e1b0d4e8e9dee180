#![warn(missing_docs)]
//! MnistBench Core - Benchmark Abstractions
//!
//! This crate defines the seams between the benchmark runner and the code it
//! measures:
//! - `Classifier` / `ClassifierFactory`: the opaque capability set every
//!   benchmarked implementation provides (fresh instance, fit, predict, score)
//! - `Registry`: identifier → factory mapping used for selection
//! - `Dataset` / `Split`: immutable feature/label partitions
//! - `DatasetSource`: where datasets come from
//! - Wall-clock timing and clock-derived seeds

mod classifier;
mod dataset;
mod error;
mod measure;
mod registry;

pub use classifier::{Classifier, ClassifierFactory, Registration};
pub use dataset::{Dataset, DatasetSource, Split, train_test_split};
pub use error::{BenchError, ClassifierError, DatasetError};
pub use measure::{Timer, clock_seed};
pub use registry::{Registry, RegistryEntry};
