//! Activation functions

use ndarray::{Array2, Axis};

/// Hidden-layer nonlinearity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// max(0, x)
    Relu,
    /// 1 / (1 + e^-x)
    Sigmoid,
    /// tanh(x)
    Tanh,
}

impl Activation {
    /// Apply in place
    pub fn apply(self, z: &mut Array2<f32>) {
        match self {
            Activation::Relu => z.mapv_inplace(|v| v.max(0.0)),
            Activation::Sigmoid => z.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => z.mapv_inplace(f32::tanh),
        }
    }

    /// Derivative expressed in terms of the activation output `a`
    pub fn derivative(self, a: &Array2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => a.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Sigmoid => a.mapv(|v| v * (1.0 - v)),
            Activation::Tanh => a.mapv(|v| 1.0 - v * v),
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activation::Relu => write!(f, "relu"),
            Activation::Sigmoid => write!(f, "sigmoid"),
            Activation::Tanh => write!(f, "tanh"),
        }
    }
}

/// Row-wise softmax, in place. Subtracts the row max for stability.
pub(crate) fn softmax(z: &mut Array2<f32>) {
    for mut row in z.axis_iter_mut(Axis(0)) {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
}
