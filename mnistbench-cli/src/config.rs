//! Configuration loading from mnistbench.toml
//!
//! MnistBench configuration can be specified in a `mnistbench.toml` file in the
//! project root. The configuration is automatically discovered by walking up
//! from the current directory. Every field has a default, so an absent file
//! reproduces the stock benchmark: one repetition, clock-derived seeds, MNIST
//! from `data/mnist`, a 0.33 held-out fraction split with seed 1234.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "mnistbench.toml";

/// MnistBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerSection,
    /// Dataset configuration
    #[serde(default)]
    pub data: DataSection,
    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerSection {
    /// Repetitions per classifier
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    /// Fixed base seed; clock-derived per repetition when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Show a progress bar on stderr
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            repetitions: default_repetitions(),
            seed: None,
            progress: default_progress(),
        }
    }
}

fn default_repetitions() -> usize {
    1
}
fn default_progress() -> bool {
    true
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSection {
    /// Dataset name: "mnist-original" or "synthetic-blobs"
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Directory holding the MNIST IDX files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Held-out fraction
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// Seed for the train/test shuffle
    #[serde(default = "default_split_seed")]
    pub split_seed: u64,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            directory: default_directory(),
            test_fraction: default_test_fraction(),
            split_seed: default_split_seed(),
        }
    }
}

fn default_dataset() -> String {
    mnistbench_data::MNIST_DATASET.to_string()
}
fn default_directory() -> PathBuf {
    PathBuf::from("data/mnist")
}
fn default_test_fraction() -> f64 {
    0.33
}
fn default_split_seed() -> u64 {
    1234
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSection {
    /// Decimal places in the classification report
    #[serde(default = "default_digits")]
    pub digits: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            digits: default_digits(),
        }
    }
}

fn default_digits() -> usize {
    mnistbench_report::DEFAULT_DIGITS
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Walk up from `start` looking for `mnistbench.toml`
    pub fn discover_from(start: impl AsRef<Path>) -> Option<PathBuf> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        match Self::discover_from(&cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# MnistBench Configuration

[runner]
# Repetitions per classifier
repetitions = 1
# Fixed base seed for reproducible runs (clock-derived when absent)
# seed = 42
# Progress bar on stderr
progress = true

[data]
# Dataset: "mnist-original" or "synthetic-blobs"
dataset = "mnist-original"
# Directory holding the MNIST IDX files (raw or .gz)
directory = "data/mnist"
# Held-out fraction
test_fraction = 0.33
# Seed for the train/test shuffle
split_seed = 1234

[output]
# Decimal places in the classification report
digits = 2
"#
        .to_string()
    }
}
