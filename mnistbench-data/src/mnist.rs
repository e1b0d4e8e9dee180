//! MNIST from Local IDX Files
//!
//! Reads the four standard MNIST files from a directory and merges the
//! official train and test splits into a single 70,000-sample dataset; the
//! benchmark draws its own held-out partition from it.

use crate::idx::{read_images, read_labels};
use mnistbench_core::{Dataset, DatasetError, DatasetSource};
use ndarray::{Array1, Array2, Axis, concatenate};
use std::path::{Path, PathBuf};

const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

/// MNIST dataset stored as IDX files in a directory
#[derive(Debug, Clone)]
pub struct MnistDir {
    root: PathBuf,
}

impl MnistDir {
    /// Use the IDX files in `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the IDX files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate `name` or its gzip-compressed variant.
    fn resolve(&self, name: &str) -> Result<PathBuf, DatasetError> {
        let raw = self.root.join(name);
        if raw.exists() {
            return Ok(raw);
        }
        let gz = self.root.join(format!("{name}.gz"));
        if gz.exists() {
            return Ok(gz);
        }
        Err(DatasetError::Io {
            path: raw,
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "MNIST file not found (place the IDX files, optionally .gz, in the data directory)",
            ),
        })
    }

    fn read_part(&self, images: &str, labels: &str) -> Result<(Array2<u8>, Vec<u8>), DatasetError> {
        let images = read_images(self.resolve(images)?)?;
        let labels = read_labels(self.resolve(labels)?)?;
        if images.nrows() != labels.len() {
            return Err(DatasetError::CountMismatch {
                images: images.nrows(),
                labels: labels.len(),
            });
        }
        Ok((images, labels))
    }

    /// Load train and test files as one dataset with pixels scaled to [0, 1].
    pub fn load(&self) -> Result<Dataset, DatasetError> {
        let (train_images, train_labels) = self.read_part(TRAIN_IMAGES, TRAIN_LABELS)?;
        let (test_images, test_labels) = self.read_part(TEST_IMAGES, TEST_LABELS)?;

        let pixels = concatenate(Axis(0), &[train_images.view(), test_images.view()]).map_err(
            |e| DatasetError::InvalidSplit(format!("train and test images differ in shape: {e}")),
        )?;
        let features = pixels.mapv(|p| f32::from(p) / 255.0);
        let labels: Array1<usize> = train_labels
            .iter()
            .chain(&test_labels)
            .map(|&l| usize::from(l))
            .collect();

        tracing::info!(
            root = %self.root.display(),
            samples = features.nrows(),
            features = features.ncols(),
            "loaded MNIST"
        );
        Dataset::new(features, labels)
    }
}

impl DatasetSource for MnistDir {
    fn fetch(&self, name: &str) -> Result<Dataset, DatasetError> {
        if crate::catalog::is_mnist(name) {
            self.load()
        } else {
            Err(DatasetError::UnknownDataset(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idx::tests::{encode_images, encode_labels, gzip};

    fn write_fixture(dir: &Path, compress_test: bool) {
        let train: Vec<Vec<u8>> = (0..3u8).map(|i| vec![i * 50; 4]).collect();
        let test: Vec<Vec<u8>> = vec![vec![255; 4]];

        std::fs::write(dir.join(TRAIN_IMAGES), encode_images(&train, 2, 2)).unwrap();
        std::fs::write(dir.join(TRAIN_LABELS), encode_labels(&[0, 1, 2])).unwrap();
        if compress_test {
            std::fs::write(
                dir.join(format!("{TEST_IMAGES}.gz")),
                gzip(&encode_images(&test, 2, 2)),
            )
            .unwrap();
            std::fs::write(dir.join(format!("{TEST_LABELS}.gz")), gzip(&encode_labels(&[9]))).unwrap();
        } else {
            std::fs::write(dir.join(TEST_IMAGES), encode_images(&test, 2, 2)).unwrap();
            std::fs::write(dir.join(TEST_LABELS), encode_labels(&[9])).unwrap();
        }
    }

    #[test]
    fn test_load_merges_train_and_test() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), false);

        let data = MnistDir::new(dir.path()).load().unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.n_features(), 4);
        assert_eq!(data.labels().to_vec(), vec![0, 1, 2, 9]);
    }

    #[test]
    fn test_pixels_are_normalised() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), false);

        let data = MnistDir::new(dir.path()).load().unwrap();
        let features = data.features();
        assert_eq!(features[[0, 0]], 0.0);
        assert_eq!(features[[3, 0]], 1.0);
        assert!(features.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_gzip_files_are_found() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), true);

        let data = MnistDir::new(dir.path()).fetch("mnist-original").unwrap();
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), false);
        std::fs::write(dir.path().join(TRAIN_LABELS), encode_labels(&[0, 1])).unwrap();

        assert!(matches!(
            MnistDir::new(dir.path()).load(),
            Err(DatasetError::CountMismatch { images: 3, labels: 2 })
        ));
    }

    #[test]
    fn test_missing_directory() {
        let err = MnistDir::new("/nonexistent/mnist").load().unwrap_err();
        assert!(err.to_string().contains(TRAIN_IMAGES));
    }

    #[test]
    fn test_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            MnistDir::new(dir.path()).fetch("cifar10"),
            Err(DatasetError::UnknownDataset(_))
        ));
    }
}
