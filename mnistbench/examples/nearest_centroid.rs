//! Benchmark a custom classifier next to softmax regression on synthetic data.
//!
//! ```text
//! cargo run --example nearest_centroid
//! ```

use mnistbench::prelude::*;
use mnistbench::{Catalog, SYNTHETIC_DATASET, SyntheticBlobs};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Predicts the class whose training mean is closest in Euclidean distance
#[derive(Default)]
struct NearestCentroid {
    centroids: Option<(Vec<usize>, Array2<f32>)>,
}

impl Classifier for NearestCentroid {
    fn fit(
        &mut self,
        x: ArrayView2<'_, f32>,
        y: ArrayView1<'_, usize>,
    ) -> Result<(), ClassifierError> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut sums = Array2::<f32>::zeros((classes.len(), x.ncols()));
        let mut counts = vec![0f32; classes.len()];
        for (row, label) in x.rows().into_iter().zip(y) {
            let k = classes.binary_search(label).unwrap_or_default();
            let mut sum = sums.row_mut(k);
            sum += &row;
            counts[k] += 1.0;
        }
        for (mut sum, count) in sums.axis_iter_mut(Axis(0)).zip(&counts) {
            sum /= *count;
        }
        self.centroids = Some((classes, sums));
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Array1<usize>, ClassifierError> {
        let (classes, centroids) = self.centroids.as_ref().ok_or(ClassifierError::NotFitted)?;
        if x.ncols() != centroids.ncols() {
            return Err(ClassifierError::FeatureMismatch {
                expected: centroids.ncols(),
                got: x.ncols(),
            });
        }
        Ok(x.rows()
            .into_iter()
            .map(|row| {
                let distances = centroids
                    .rows()
                    .into_iter()
                    .map(|c| (&c - &row).mapv(|d| d * d).sum());
                let (k, _) = distances.enumerate().fold((0, f32::INFINITY), |best, (k, d)| {
                    if d < best.1 { (k, d) } else { best }
                });
                classes[k]
            })
            .collect())
    }
}

struct NearestCentroidFactory;

impl ClassifierFactory for NearestCentroidFactory {
    fn build(&self, _seed: u64) -> Box<dyn Classifier> {
        Box::new(NearestCentroid::default())
    }

    fn describe(&self) -> String {
        "nearest centroid".to_string()
    }
}

fn main() -> anyhow::Result<()> {
    let registry = Registry::new()
        .with(RegistryEntry {
            id: "centroid",
            summary: "nearest class mean",
            register: || Registration::new("nearest_centroid", NearestCentroidFactory),
        })
        .with(RegistryEntry {
            id: "linear",
            summary: "softmax regression, SGD",
            register: || Registration::new("softmax", MlpConfig::linear().epochs(20)),
        });

    let settings = Settings {
        repetitions: 3,
        seed: Some(42),
        progress: false,
        dataset: SYNTHETIC_DATASET.to_string(),
        data_dir: "data/mnist".into(),
        test_fraction: 0.33,
        split_seed: 1234,
        digits: 2,
    };
    let source = Catalog::new(&settings.data_dir).with_synthetic(SyntheticBlobs::new(600, 8, 3));

    let tokens = vec!["centroid".to_string(), "linear".to_string()];
    let stdout = std::io::stdout();
    benchmark(&tokens, &settings, &registry, &source, &mut stdout.lock())?;
    Ok(())
}
