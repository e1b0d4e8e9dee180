//! Dataset Catalog
//!
//! Resolves a dataset name to the source that can produce it.

use crate::mnist::MnistDir;
use crate::synthetic::SyntheticBlobs;
use mnistbench_core::{Dataset, DatasetError, DatasetSource};
use std::path::PathBuf;

/// Name of the full 70,000-sample MNIST dataset
pub const MNIST_DATASET: &str = "mnist-original";

/// Name of the generated clustered dataset
pub const SYNTHETIC_DATASET: &str = "synthetic-blobs";

pub(crate) fn is_mnist(name: &str) -> bool {
    matches!(name, MNIST_DATASET | "mnist")
}

/// Dispatches dataset names to MNIST files or the synthetic generator
#[derive(Debug, Clone)]
pub struct Catalog {
    mnist: MnistDir,
    synthetic: SyntheticBlobs,
}

impl Catalog {
    /// Catalog reading MNIST from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            mnist: MnistDir::new(data_dir),
            synthetic: SyntheticBlobs::default(),
        }
    }

    /// Replace the synthetic generator settings
    pub fn with_synthetic(mut self, synthetic: SyntheticBlobs) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Names this catalog can fetch
    pub fn names(&self) -> &'static [&'static str] {
        &[MNIST_DATASET, SYNTHETIC_DATASET]
    }
}

impl DatasetSource for Catalog {
    fn fetch(&self, name: &str) -> Result<Dataset, DatasetError> {
        tracing::info!(dataset = name, "fetching dataset");
        if is_mnist(name) {
            self.mnist.load()
        } else if name == SYNTHETIC_DATASET {
            self.synthetic.generate()
        } else {
            Err(DatasetError::UnknownDataset(name.to_string()))
        }
    }
}
