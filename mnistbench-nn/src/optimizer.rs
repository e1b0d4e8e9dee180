//! Parameter update rules

use ndarray::{Array, Dimension};

/// How gradients are turned into parameter updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateRule {
    /// `p -= lr * g`
    Sgd,
    /// Classical momentum: `v = mu * v - lr * g; p += v`
    Momentum {
        /// Velocity decay `mu`
        momentum: f32,
    },
    /// Nesterov momentum: `v = mu * v - lr * g; p += mu * v - lr * g`
    Nesterov {
        /// Velocity decay `mu`
        momentum: f32,
    },
}

impl UpdateRule {
    /// Whether this rule keeps a velocity buffer per parameter
    pub fn uses_velocity(self) -> bool {
        !matches!(self, UpdateRule::Sgd)
    }

    /// Apply one update to `param` given its gradient and velocity buffer.
    pub(crate) fn step<D: Dimension>(
        self,
        param: &mut Array<f32, D>,
        grad: &Array<f32, D>,
        velocity: &mut Array<f32, D>,
        learning_rate: f32,
    ) {
        match self {
            UpdateRule::Sgd => param.scaled_add(-learning_rate, grad),
            UpdateRule::Momentum { momentum } => {
                velocity.mapv_inplace(|v| v * momentum);
                velocity.scaled_add(-learning_rate, grad);
                param.scaled_add(1.0, velocity);
            }
            UpdateRule::Nesterov { momentum } => {
                velocity.mapv_inplace(|v| v * momentum);
                velocity.scaled_add(-learning_rate, grad);
                param.scaled_add(momentum, velocity);
                param.scaled_add(-learning_rate, grad);
            }
        }
    }
}

impl std::fmt::Display for UpdateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateRule::Sgd => write!(f, "sgd"),
            UpdateRule::Momentum { momentum } => write!(f, "momentum({momentum})"),
            UpdateRule::Nesterov { momentum } => write!(f, "nesterov({momentum})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sgd_step() {
        let mut p = array![1.0f32, 2.0];
        let mut v = array![0.0f32, 0.0];
        UpdateRule::Sgd.step(&mut p, &array![1.0, -1.0], &mut v, 0.5);

        assert_eq!(p, array![0.5, 2.5]);
        assert_eq!(v, array![0.0, 0.0]);
    }

    #[test]
    fn test_momentum_accumulates() {
        let rule = UpdateRule::Momentum { momentum: 0.5 };
        let mut p = array![0.0f32];
        let mut v = array![0.0f32];
        let g = array![1.0f32];

        rule.step(&mut p, &g, &mut v, 1.0);
        assert_eq!(v, array![-1.0]);
        assert_eq!(p, array![-1.0]);

        rule.step(&mut p, &g, &mut v, 1.0);
        assert_eq!(v, array![-1.5]);
        assert_eq!(p, array![-2.5]);
    }

    #[test]
    fn test_nesterov_looks_ahead() {
        let rule = UpdateRule::Nesterov { momentum: 0.5 };
        let mut p = array![0.0f32];
        let mut v = array![0.0f32];

        rule.step(&mut p, &array![1.0f32], &mut v, 1.0);
        // v = -1; p += 0.5 * -1 - 1
        assert_eq!(v, array![-1.0]);
        assert_eq!(p, array![-1.5]);
    }

    #[test]
    fn test_display() {
        assert_eq!(UpdateRule::Nesterov { momentum: 0.9 }.to_string(), "nesterov(0.9)");
        assert!(!UpdateRule::Sgd.uses_velocity());
    }
}
