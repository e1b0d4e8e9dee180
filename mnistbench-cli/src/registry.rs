//! Built-in classifier implementations
//!
//! Hyperparameters are fixed here rather than exposed as flags: a benchmark
//! compares implementations, not tunings.

use mnistbench_core::{Registration, Registry, RegistryEntry};
use mnistbench_nn::{Activation, MlpConfig, UpdateRule};

/// Sigmoid hidden layer trained with plain SGD and a decaying learning rate
pub fn sgd() -> Registration {
    Registration::new(
        "mlp.sgd",
        MlpConfig::default()
            .hidden(vec![300])
            .activation(Activation::Sigmoid)
            .update(UpdateRule::Sgd)
            .learning_rate(0.3)
            .learning_rate_decay(0.9)
            .batch_size(64)
            .epochs(10),
    )
}

/// ReLU hidden layer trained with classical momentum
pub fn momentum() -> Registration {
    Registration::new(
        "mlp.momentum",
        MlpConfig::default()
            .hidden(vec![300])
            .activation(Activation::Relu)
            .update(UpdateRule::Momentum { momentum: 0.9 })
            .learning_rate(0.02)
            .batch_size(25)
            .epochs(10),
    )
}

/// ReLU hidden layer trained with Nesterov momentum
pub fn nesterov() -> Registration {
    Registration::new(
        "mlp.nesterov",
        MlpConfig::default()
            .hidden(vec![300])
            .activation(Activation::Relu)
            .update(UpdateRule::Nesterov { momentum: 0.9 })
            .learning_rate(0.02)
            .batch_size(25)
            .epochs(10),
    )
}

/// Registry of every built-in implementation, in report order
pub fn builtin_registry() -> Registry {
    Registry::new()
        .with(RegistryEntry {
            id: "sgd",
            summary: "300 sigmoid units, SGD lr=0.3 decaying 0.9/epoch, batch 64, 10 epochs",
            register: sgd,
        })
        .with(RegistryEntry {
            id: "momentum",
            summary: "300 ReLU units, momentum 0.9, lr=0.02, batch 25, 10 epochs",
            register: momentum,
        })
        .with(RegistryEntry {
            id: "nesterov",
            summary: "300 ReLU units, Nesterov momentum 0.9, lr=0.02, batch 25, 10 epochs",
            register: nesterov,
        })
}

/// Message printed when no implementation was named
pub fn usage_message(registry: &Registry) -> String {
    let ids: Vec<String> = registry.ids().iter().map(|id| format!("'{id}'")).collect();
    let list = match ids.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(" "), last),
        None => String::from("(none registered)"),
    };
    format!("ERROR: Please specify implementation to benchmark, {list}.")
}
