//! MLP Classifier
//!
//! [`MlpConfig`] holds hyperparameters and acts as the benchmark prototype;
//! [`MlpClassifier`] is one trainable instance built from it.

use crate::activation::Activation;
use crate::network::{Network, argmax};
use crate::optimizer::UpdateRule;
use mnistbench_core::{Classifier, ClassifierError, ClassifierFactory};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Hyperparameters of a multilayer perceptron
#[derive(Debug, Clone, PartialEq)]
pub struct MlpConfig {
    /// Width of each hidden layer; empty means softmax regression
    pub hidden_layers: Vec<usize>,
    /// Hidden-layer activation
    pub activation: Activation,
    /// Parameter update rule
    pub update: UpdateRule,
    /// Initial learning rate
    pub learning_rate: f32,
    /// Multiplier applied to the learning rate after every epoch
    pub learning_rate_decay: f32,
    /// Minibatch size
    pub batch_size: usize,
    /// Passes over the training set
    pub epochs: usize,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![300],
            activation: Activation::Relu,
            update: UpdateRule::Momentum { momentum: 0.9 },
            learning_rate: 0.02,
            learning_rate_decay: 1.0,
            batch_size: 25,
            epochs: 10,
        }
    }
}

impl MlpConfig {
    /// Softmax regression (no hidden layers)
    pub fn linear() -> Self {
        Self {
            hidden_layers: Vec::new(),
            update: UpdateRule::Sgd,
            learning_rate: 0.1,
            ..Self::default()
        }
    }

    /// Set hidden layer widths
    pub fn hidden(mut self, layers: impl Into<Vec<usize>>) -> Self {
        self.hidden_layers = layers.into();
        self
    }

    /// Set hidden activation
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Set update rule
    pub fn update(mut self, update: UpdateRule) -> Self {
        self.update = update;
        self
    }

    /// Set initial learning rate
    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set per-epoch learning-rate decay
    pub fn learning_rate_decay(mut self, decay: f32) -> Self {
        self.learning_rate_decay = decay;
        self
    }

    /// Set minibatch size
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set epoch count
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }
}

impl ClassifierFactory for MlpConfig {
    fn build(&self, seed: u64) -> Box<dyn Classifier> {
        Box::new(MlpClassifier::new(self.clone(), seed))
    }

    fn describe(&self) -> String {
        let hidden = if self.hidden_layers.is_empty() {
            "none".to_string()
        } else {
            self.hidden_layers
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("-")
        };
        format!(
            "mlp hidden={} activation={} update={} lr={} decay={} batch={} epochs={}",
            hidden,
            self.activation,
            self.update,
            self.learning_rate,
            self.learning_rate_decay,
            self.batch_size,
            self.epochs
        )
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    network: Network,
    /// Sorted distinct training labels; output unit `i` predicts `classes[i]`
    classes: Vec<usize>,
}

/// A trainable multilayer perceptron instance
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    config: MlpConfig,
    seed: u64,
    fitted: Option<Fitted>,
}

impl MlpClassifier {
    /// Untrained instance
    pub fn new(config: MlpConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            fitted: None,
        }
    }

    /// Seed driving initialisation and shuffling
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether `fit` has completed
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Labels learned during `fit`
    pub fn classes(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.classes.as_slice())
    }
}

impl Classifier for MlpClassifier {
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
        if x.nrows() == 0 {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let targets: Array1<usize> = y
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut network = Network::new(
            x.ncols(),
            &self.config.hidden_layers,
            classes.len(),
            self.config.activation,
            &mut rng,
        );

        let batch_size = self.config.batch_size.max(1);
        let mut order: Vec<usize> = (0..x.nrows()).collect();
        let mut learning_rate = self.config.learning_rate;

        for epoch in 1..=self.config.epochs {
            order.shuffle(&mut rng);
            let mut loss = 0.0;
            let mut correct = 0;

            for batch in order.chunks(batch_size) {
                let xb = x.select(Axis(0), batch);
                let yb = targets.select(Axis(0), batch);
                let stats =
                    network.train_batch(xb.view(), yb.view(), self.config.update, learning_rate);
                loss += stats.loss;
                correct += stats.correct;
            }

            let mean_loss = loss / x.nrows() as f64;
            if !mean_loss.is_finite() {
                return Err(ClassifierError::Diverged {
                    epoch,
                    loss: mean_loss,
                });
            }
            tracing::debug!(
                epoch,
                loss = mean_loss,
                train_accuracy = correct as f64 / x.nrows() as f64,
                learning_rate,
                "epoch complete"
            );

            learning_rate *= self.config.learning_rate_decay;
        }

        self.fitted = Some(Fitted { network, classes });
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Array1<usize>, ClassifierError> {
        let fitted = self.fitted.as_ref().ok_or(ClassifierError::NotFitted)?;
        let expected = fitted.network.inputs();
        if x.ncols() != expected {
            return Err(ClassifierError::FeatureMismatch {
                expected,
                got: x.ncols(),
            });
        }

        let probs = fitted.network.predict_proba(x);
        Ok(probs
            .rows()
            .into_iter()
            .map(|row| fitted.classes[argmax(row)])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    /// Two well-separated clusters, labels 3 and 8
    fn clusters(n: usize) -> (Array2<f32>, Array1<usize>) {
        let x = Array2::from_shape_fn((n, 2), |(i, j)| {
            let centre = if (i % 2 == 0) == (j == 0) { 2.0 } else { -2.0 };
            centre + ((i * 7 + j * 3) % 10) as f32 * 0.05
        });
        let y = Array1::from_shape_fn(n, |i| if i % 2 == 0 { 3 } else { 8 });
        (x, y)
    }

    #[test]
    fn test_learns_separable_clusters() {
        let (x, y) = clusters(80);
        let mut clf = MlpConfig::default()
            .hidden(vec![8])
            .epochs(20)
            .batch_size(8)
            .build(42);

        clf.fit(x.view(), y.view()).unwrap();
        assert_eq!(clf.score(x.view(), y.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_predicts_original_labels() {
        let (x, y) = clusters(40);
        let mut clf = MlpClassifier::new(MlpConfig::linear().epochs(30), 7);

        clf.fit(x.view(), y.view()).unwrap();
        assert_eq!(clf.classes(), Some(&[3usize, 8][..]));
        let predicted = clf.predict(x.view()).unwrap();
        assert!(predicted.iter().all(|&l| l == 3 || l == 8));
    }

    #[test]
    fn test_same_seed_same_model() {
        let (x, y) = clusters(60);
        let config = MlpConfig::default()
            .hidden(vec![6])
            .update(UpdateRule::Nesterov { momentum: 0.9 })
            .epochs(3);
        let mut a = MlpClassifier::new(config.clone(), 11);
        let mut b = MlpClassifier::new(config, 11);
        a.fit(x.view(), y.view()).unwrap();
        b.fit(x.view(), y.view()).unwrap();

        let queries = array![[0.1f32, -0.3], [1.5, 1.5], [-2.0, 2.0]];
        assert_eq!(a.predict(queries.view()).unwrap(), b.predict(queries.view()).unwrap());
    }

    #[test]
    fn test_unfitted_and_shape_errors() {
        let clf = MlpClassifier::new(MlpConfig::linear(), 0);
        assert!(!clf.is_fitted());
        assert!(matches!(
            clf.predict(array![[0.0f32, 0.0]].view()),
            Err(ClassifierError::NotFitted)
        ));

        let mut clf = MlpClassifier::new(MlpConfig::linear().epochs(1), 0);
        assert!(matches!(
            clf.fit(array![[0.0f32, 0.0]].view(), array![1usize, 2].view()),
            Err(ClassifierError::ShapeMismatch { rows: 1, labels: 2 })
        ));
        assert!(matches!(
            clf.fit(Array2::<f32>::zeros((0, 2)).view(), Array1::<usize>::zeros(0).view()),
            Err(ClassifierError::EmptyTrainingSet)
        ));

        let (x, y) = clusters(10);
        clf.fit(x.view(), y.view()).unwrap();
        assert!(matches!(
            clf.predict(array![[0.0f32, 0.0, 0.0]].view()),
            Err(ClassifierError::FeatureMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_divergence_is_reported() {
        let (mut x, y) = clusters(20);
        x[[5, 1]] = f32::NAN;
        let mut clf = MlpClassifier::new(MlpConfig::linear().epochs(3), 1);

        assert!(matches!(
            clf.fit(x.view(), y.view()),
            Err(ClassifierError::Diverged { epoch: 1, loss }) if loss.is_nan()
        ));
        assert!(!clf.is_fitted());
    }

    #[test]
    fn test_describe() {
        let description = MlpConfig::default().describe();
        assert!(description.contains("hidden=300"));
        assert!(description.contains("momentum(0.9)"));
        assert_eq!(
            MlpConfig::linear().describe().split_whitespace().nth(1),
            Some("hidden=none")
        );
    }
}
