#![warn(missing_docs)]
//! MnistBench Data Sources
//!
//! Implementations of [`DatasetSource`](mnistbench_core::DatasetSource):
//! - [`MnistDir`]: MNIST read from local IDX files (raw or gzip-compressed)
//! - [`SyntheticBlobs`]: deterministic, well-separated clusters for demos and tests
//! - [`Catalog`]: picks one of the above by dataset name

mod catalog;
mod idx;
mod mnist;
mod synthetic;

pub use catalog::{Catalog, MNIST_DATASET, SYNTHETIC_DATASET};
pub use idx::{IMAGES_MAGIC, LABELS_MAGIC, read_images, read_labels};
pub use mnist::MnistDir;
pub use synthetic::SyntheticBlobs;
