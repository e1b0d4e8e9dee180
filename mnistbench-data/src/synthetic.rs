//! Synthetic Blobs
//!
//! Balanced, linearly separable clusters with uniform noise. Sample `i`
//! belongs to class `i % classes`, and class centres sit on a lattice so any
//! two classes differ by at least `separation` along some feature.

use mnistbench_core::{Dataset, DatasetError, DatasetSource};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator for a deterministic clustered classification dataset
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticBlobs {
    /// Number of samples
    pub samples: usize,
    /// Number of features per sample
    pub features: usize,
    /// Number of classes
    pub classes: usize,
    /// Distance between neighbouring class centres along a feature
    pub separation: f32,
    /// Half-width of the uniform noise around each centre
    pub noise: f32,
    /// RNG seed
    pub seed: u64,
}

impl Default for SyntheticBlobs {
    fn default() -> Self {
        Self {
            samples: 1000,
            features: 16,
            classes: 4,
            separation: 4.0,
            noise: 1.0,
            seed: 1234,
        }
    }
}

impl SyntheticBlobs {
    /// `samples` × `features` with `classes` clusters, other settings default
    pub fn new(samples: usize, features: usize, classes: usize) -> Self {
        Self {
            samples,
            features,
            classes,
            ..Self::default()
        }
    }

    /// Replace the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn centre(&self, class: usize, feature: usize) -> f32 {
        ((class + feature) % self.classes) as f32 * self.separation
    }

    /// Generate the dataset
    pub fn generate(&self) -> Result<Dataset, DatasetError> {
        if self.classes == 0 || self.features == 0 {
            return Err(DatasetError::InvalidSplit(
                "synthetic blobs need at least one class and one feature".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let labels = Array1::from_shape_fn(self.samples, |i| i % self.classes);
        let features = Array2::from_shape_fn((self.samples, self.features), |(i, j)| {
            let jitter = if self.noise > 0.0 {
                rng.gen_range(-self.noise..self.noise)
            } else {
                0.0
            };
            self.centre(i % self.classes, j) + jitter
        });

        Dataset::new(features, labels)
    }
}

impl DatasetSource for SyntheticBlobs {
    fn fetch(&self, name: &str) -> Result<Dataset, DatasetError> {
        if name == crate::catalog::SYNTHETIC_DATASET {
            self.generate()
        } else {
            Err(DatasetError::UnknownDataset(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_balance() {
        let data = SyntheticBlobs::new(100, 4, 2).generate().unwrap();

        assert_eq!(data.len(), 100);
        assert_eq!(data.n_features(), 4);
        let ones = data.labels().iter().filter(|&&l| l == 1).count();
        assert_eq!(ones, 50);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = SyntheticBlobs::new(20, 3, 3).with_seed(5).generate().unwrap();
        let b = SyntheticBlobs::new(20, 3, 3).with_seed(5).generate().unwrap();
        let c = SyntheticBlobs::new(20, 3, 3).with_seed(6).generate().unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_samples_stay_near_centre() {
        let blobs = SyntheticBlobs::new(30, 2, 3);
        let data = blobs.generate().unwrap();

        for (i, row) in data.features().rows().into_iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert!((v - blobs.centre(i % 3, j)).abs() <= blobs.noise);
            }
        }
    }

    #[test]
    fn test_zero_classes_rejected() {
        assert!(SyntheticBlobs::new(10, 2, 0).generate().is_err());
    }

    #[test]
    fn test_fetch_by_name() {
        let blobs = SyntheticBlobs::new(10, 2, 2);
        assert!(blobs.fetch("synthetic-blobs").is_ok());
        assert!(matches!(
            blobs.fetch("mnist"),
            Err(DatasetError::UnknownDataset(_))
        ));
    }
}
