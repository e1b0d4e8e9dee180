//! Fully-Connected Network
//!
//! Dense layers with a shared hidden activation and a softmax output.
//! Weights are `inputs × outputs`, so a batch forward pass is `a · W + b`.

use crate::activation::{Activation, softmax};
use crate::optimizer::UpdateRule;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

/// Rows per chunk when predicting, bounds activation memory on large inputs
const PREDICT_CHUNK: usize = 1024;

/// Keeps `ln` finite for zero probabilities
const LOG_EPSILON: f32 = 1e-7;

#[derive(Debug, Clone)]
struct Dense {
    weights: Array2<f32>,
    bias: Array1<f32>,
    weights_velocity: Array2<f32>,
    bias_velocity: Array1<f32>,
}

impl Dense {
    /// Glorot-uniform weights, zero bias
    fn new(inputs: usize, outputs: usize, rng: &mut impl Rng) -> Self {
        let limit = (6.0 / (inputs + outputs) as f32).sqrt();
        Self {
            weights: Array2::from_shape_fn((inputs, outputs), |_| rng.gen_range(-limit..limit)),
            bias: Array1::zeros(outputs),
            weights_velocity: Array2::zeros((inputs, outputs)),
            bias_velocity: Array1::zeros(outputs),
        }
    }

    fn forward(&self, input: &ArrayView2<'_, f32>) -> Array2<f32> {
        input.dot(&self.weights) + &self.bias
    }
}

/// Result of training on one minibatch
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BatchStats {
    /// Summed (not averaged) cross-entropy over the batch
    pub loss: f64,
    /// Correct predictions in the batch, before the update
    pub correct: usize,
}

/// A trained or in-training network
#[derive(Debug, Clone)]
pub(crate) struct Network {
    layers: Vec<Dense>,
    activation: Activation,
}

impl Network {
    /// Randomly initialised network `inputs → hidden... → outputs`
    pub fn new(
        inputs: usize,
        hidden: &[usize],
        outputs: usize,
        activation: Activation,
        rng: &mut impl Rng,
    ) -> Self {
        let widths: Vec<usize> = std::iter::once(inputs)
            .chain(hidden.iter().copied())
            .chain(std::iter::once(outputs))
            .collect();
        let layers = widths
            .windows(2)
            .map(|pair| Dense::new(pair[0], pair[1], &mut *rng))
            .collect();
        Self { layers, activation }
    }

    /// Width of the input layer
    pub fn inputs(&self) -> usize {
        self.layers.first().map_or(0, |l| l.weights.nrows())
    }

    /// Activations of every layer; the last one holds softmax probabilities.
    fn forward_all(&self, x: ArrayView2<'_, f32>) -> Vec<Array2<f32>> {
        let mut activations: Vec<Array2<f32>> = Vec::with_capacity(self.layers.len());
        let last = self.layers.len() - 1;
        for (idx, layer) in self.layers.iter().enumerate() {
            let input = match activations.last() {
                Some(a) => a.view(),
                None => x.view(),
            };
            let mut z = layer.forward(&input);
            if idx == last {
                softmax(&mut z);
            } else {
                self.activation.apply(&mut z);
            }
            activations.push(z);
        }
        activations
    }

    /// Class probabilities for every row of `x`
    pub fn predict_proba(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        let outputs = self.layers.last().map_or(0, |l| l.bias.len());
        let mut probs = Array2::zeros((x.nrows(), outputs));
        for (chunk_idx, chunk) in x.axis_chunks_iter(Axis(0), PREDICT_CHUNK).enumerate() {
            let start = chunk_idx * PREDICT_CHUNK;
            let end = start + chunk.nrows();
            if let Some(out) = self.forward_all(chunk).pop() {
                probs.slice_mut(ndarray::s![start..end, ..]).assign(&out);
            }
        }
        probs
    }

    /// One forward/backward pass and parameter update on a minibatch.
    ///
    /// `targets` are class indices into the output layer.
    pub fn train_batch(
        &mut self,
        x: ArrayView2<'_, f32>,
        targets: ArrayView1<'_, usize>,
        rule: UpdateRule,
        learning_rate: f32,
    ) -> BatchStats {
        let batch = x.nrows();
        let activations = self.forward_all(x);
        let probs = &activations[activations.len() - 1];

        let mut stats = BatchStats::default();
        for (row, &target) in probs.rows().into_iter().zip(targets) {
            stats.loss -= f64::from((row[target] + LOG_EPSILON).ln());
            if argmax(row) == target {
                stats.correct += 1;
            }
        }

        // d(mean cross-entropy)/dz for softmax output
        let mut delta = probs.clone();
        for (mut row, &target) in delta.rows_mut().into_iter().zip(targets) {
            row[target] -= 1.0;
        }
        delta /= batch as f32;

        for idx in (0..self.layers.len()).rev() {
            let input = if idx == 0 {
                x.view()
            } else {
                activations[idx - 1].view()
            };
            let grad_w = input.t().dot(&delta);
            let grad_b = delta.sum_axis(Axis(0));

            // Propagate through the pre-update weights
            if idx > 0 {
                let mut next = delta.dot(&self.layers[idx].weights.t());
                next *= &self.activation.derivative(&activations[idx - 1]);
                delta = next;
            }

            let layer = &mut self.layers[idx];
            rule.step(
                &mut layer.weights,
                &grad_w,
                &mut layer.weights_velocity,
                learning_rate,
            );
            rule.step(
                &mut layer.bias,
                &grad_b,
                &mut layer.bias_velocity,
                learning_rate,
            );
        }

        stats
    }
}

/// Index of the largest value in `row` (first one on ties)
///
/// NaN never compares greater, so an all-NaN row maps to index 0. `fit`
/// rejects non-finite losses, which keeps such rows out of trained models.
pub(crate) fn argmax(row: ArrayView1<'_, f32>) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, max), (idx, &v)| {
            if v > max { (idx, v) } else { (best, max) }
        })
        .0
}
