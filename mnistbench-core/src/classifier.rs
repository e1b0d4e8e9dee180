//! Classifier Capability Set
//!
//! The runner treats every implementation as opaque. All it needs is a way to
//! build a fresh, independently seeded instance and the fit/predict/score trio.

use crate::error::ClassifierError;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// A trainable classifier over dense `f32` features and integer class labels.
pub trait Classifier {
    /// Train on `x` (samples × features) with labels `y`.
    fn fit(&mut self, x: ArrayView2<'_, f32>, y: ArrayView1<'_, usize>)
    -> Result<(), ClassifierError>;

    /// Predict one label per row of `x`.
    fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Array1<usize>, ClassifierError>;

    /// Fraction of rows of `x` whose prediction equals `y`.
    fn score(&self, x: ArrayView2<'_, f32>, y: ArrayView1<'_, usize>) -> Result<f64, ClassifierError> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        let predicted = self.predict(x)?;
        let truth: Vec<usize> = y.to_vec();
        Ok(mnistbench_stats::accuracy(&truth, &predicted.to_vec()))
    }
}

/// Produces fresh classifier instances from a fixed configuration.
///
/// Every call to [`build`](ClassifierFactory::build) must return an instance
/// that shares no mutable state with any previously built one. This is the
/// "clone + reseed" step of a benchmark repetition.
pub trait ClassifierFactory {
    /// Build an untrained instance whose randomness is driven by `seed`.
    fn build(&self, seed: u64) -> Box<dyn Classifier>;

    /// One-line description of the configuration, for logs and listings.
    fn describe(&self) -> String {
        String::from("classifier")
    }
}

/// A named classifier prototype selected for benchmarking
pub struct Registration {
    /// Display name used in reports
    pub name: String,
    /// Fresh-instance factory
    pub factory: Box<dyn ClassifierFactory>,
}

impl Registration {
    /// Create a registration
    pub fn new(name: impl Into<String>, factory: impl ClassifierFactory + 'static) -> Self {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("factory", &self.factory.describe())
            .finish()
    }
}
