//! Datasets and Train/Test Partitioning
//!
//! A `Dataset` pairs a dense feature matrix with one label per row. Once
//! loaded and split, partitions are never mutated for the rest of the run.

use crate::error::DatasetError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Feature matrix (samples × features) and parallel label vector
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Array1<usize>,
}

impl Dataset {
    /// Create a dataset, checking that every feature row has a label.
    pub fn new(features: Array2<f32>, labels: Array1<usize>) -> Result<Self, DatasetError> {
        if features.nrows() != labels.len() {
            return Err(DatasetError::ShapeMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of features per sample
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Feature matrix view
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    /// Label vector view
    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    /// Copy out the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }
}

/// Disjoint training and held-out partitions
#[derive(Debug, Clone)]
pub struct Split {
    /// Training partition
    pub train: Dataset,
    /// Held-out evaluation partition
    pub test: Dataset,
}

/// Shuffle `dataset` with `seed` and hold out `ceil(test_fraction * n)` samples.
///
/// The result depends only on the dataset, the fraction and the seed.
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<Split, DatasetError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DatasetError::InvalidSplit(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = dataset.len();
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(DatasetError::InvalidSplit(format!(
            "{n} samples with test fraction {test_fraction} leaves an empty partition"
        )));
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let (test_idx, train_idx) = permutation.split_at(n_test);
    tracing::debug!(
        train = train_idx.len(),
        test = test_idx.len(),
        seed,
        "split dataset"
    );

    Ok(Split {
        train: dataset.select(train_idx),
        test: dataset.select(test_idx),
    })
}

/// Supplies datasets by name
pub trait DatasetSource {
    /// Load the named dataset.
    fn fetch(&self, name: &str) -> Result<Dataset, DatasetError>;
}
