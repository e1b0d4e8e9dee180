#![warn(missing_docs)]
//! MnistBench Neural Networks
//!
//! A small fully-connected network trained with minibatch gradient descent,
//! exposed through the [`Classifier`](mnistbench_core::Classifier) /
//! [`ClassifierFactory`](mnistbench_core::ClassifierFactory) seams:
//! - Hidden activations: ReLU, sigmoid, tanh
//! - Softmax output with cross-entropy loss
//! - Update rules: plain SGD (with per-epoch learning-rate decay), classical
//!   momentum, Nesterov momentum
//!
//! An [`MlpConfig`] is the prototype; every [`build`](mnistbench_core::ClassifierFactory::build)
//! yields an independent [`MlpClassifier`] seeded for weight initialisation and
//! minibatch shuffling.

mod activation;
mod classifier;
mod network;
mod optimizer;

pub use activation::Activation;
pub use classifier::{MlpClassifier, MlpConfig};
pub use optimizer::UpdateRule;
