//! Integration tests for MnistBench
//!
//! These tests verify the end-to-end behavior of the benchmark: selection,
//! data loading, repetitions, statistics and the text report.

use mnistbench::{
    BenchConfig, Catalog, Cli, Dataset, DatasetError, DatasetSource, MlpConfig, Registration,
    Registry, RegistryEntry, SYNTHETIC_DATASET, Settings, SyntheticBlobs, UsageError, benchmark,
    builtin_registry,
};
use mnistbench::{Classifier, ClassifierError, ClassifierFactory};
use regex::Regex;
use std::cell::Cell;

fn linear() -> Registration {
    Registration::new("softmax.linear", MlpConfig::linear().epochs(20))
}

fn registry() -> Registry {
    Registry::new().with(RegistryEntry {
        id: "linear",
        summary: "softmax regression",
        register: linear,
    })
}

/// Catalog over 100 × 4 synthetic samples in two balanced classes
fn blobs() -> Catalog {
    Catalog::new("/nonexistent").with_synthetic(SyntheticBlobs::new(100, 4, 2))
}

fn settings(repetitions: usize, seed: Option<u64>) -> Settings {
    Settings {
        repetitions,
        seed,
        progress: false,
        dataset: SYNTHETIC_DATASET.to_string(),
        data_dir: "/nonexistent".into(),
        test_fraction: 0.33,
        split_seed: 1234,
        digits: 2,
    }
}

fn tokens(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Counts fetches and delegates to a catalog
struct CountingSource {
    inner: Catalog,
    fetches: Cell<usize>,
}

impl CountingSource {
    fn new(inner: Catalog) -> Self {
        Self {
            inner,
            fetches: Cell::new(0),
        }
    }
}

impl DatasetSource for CountingSource {
    fn fetch(&self, name: &str) -> Result<Dataset, DatasetError> {
        self.fetches.set(self.fetches.get() + 1);
        self.inner.fetch(name)
    }
}

/// Test the full pipeline output on a small synthetic dataset
#[test]
fn test_end_to_end_synthetic() {
    let source = CountingSource::new(blobs());
    let mut out = Vec::new();

    let report = benchmark(
        &tokens(&["linear"]),
        &settings(3, None),
        &registry(),
        &source,
        &mut out,
    )
    .unwrap()
    .unwrap();

    assert_eq!(source.fetches.get(), 1);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].runs.len(), 3);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "softmax.linear");
    assert!(
        Regex::new(r"^\tAccuracy: +\d{1,3}\.\d{2}% ±\d+\.\d{2}$")
            .unwrap()
            .is_match(lines[2]),
        "unexpected accuracy line: {:?}",
        lines[2]
    );
    assert!(
        Regex::new(r"^\tTimes: +\d+\.\d{2}s ±\d+\.\d{2}$")
            .unwrap()
            .is_match(lines[3]),
        "unexpected times line: {:?}",
        lines[3]
    );
    assert_eq!(lines[4], "\tReport:");

    // Both classes appear as rows of the classification table
    let class_row = Regex::new(r"^ +(\d+)( +\d\.\d{2}){3} +\d+$").unwrap();
    let classes: Vec<&str> = lines
        .iter()
        .filter_map(|l| class_row.captures(l))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    assert_eq!(classes, vec!["0", "1"]);

    // 33 of 100 samples are held out
    let support = Regex::new(r"^ +accuracy +\d\.\d{2} +(\d+)$").unwrap();
    let held_out = lines
        .iter()
        .find_map(|l| support.captures(l))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());
    assert_eq!(held_out, Some("33"));
}

/// Test that nothing is loaded when no implementation is named
#[test]
fn test_no_selection_is_usage_error() {
    let source = CountingSource::new(blobs());
    let mut out = Vec::new();

    let err = benchmark(
        &[],
        &settings(1, None),
        &builtin_registry(),
        &source,
        &mut out,
    )
    .unwrap_err();

    let usage = err.downcast_ref::<UsageError>().unwrap();
    assert_eq!(
        usage.to_string(),
        "ERROR: Please specify implementation to benchmark, 'sgd' 'momentum' or 'nesterov'."
    );
    assert_eq!(source.fetches.get(), 0);
    assert!(out.is_empty());
}

/// Test that a fixed seed reproduces the same accuracy
#[test]
fn test_fixed_seed_is_reproducible() {
    let run = || {
        benchmark(
            &tokens(&["linear"]),
            &settings(1, Some(42)),
            &registry(),
            &blobs(),
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first.results[0].runs[0].seed, 42);
    assert_eq!(
        first.results[0].runs[0].accuracy,
        second.results[0].runs[0].accuracy
    );
}

/// Test summary invariants for a single repetition
#[test]
fn test_single_repetition_statistics() {
    let report = benchmark(
        &tokens(&["linear"]),
        &settings(1, Some(7)),
        &registry(),
        &blobs(),
        &mut Vec::new(),
    )
    .unwrap()
    .unwrap();

    let result = &report.results[0];
    assert!((0.0..=1.0).contains(&result.accuracy.mean));
    assert_eq!(result.accuracy.std_dev, 0.0);
    assert_eq!(result.time.std_dev, 0.0);
    assert_eq!(result.accuracy.mean, result.runs[0].accuracy);
}

/// Test that spread statistics stay non-negative over several repetitions
#[test]
fn test_repeated_statistics_bounds() {
    let report = benchmark(
        &tokens(&["linear"]),
        &settings(3, Some(1)),
        &registry(),
        &blobs(),
        &mut Vec::new(),
    )
    .unwrap()
    .unwrap();

    let result = &report.results[0];
    let seeds: Vec<u64> = result.runs.iter().map(|r| r.seed).collect();
    assert_eq!(seeds, vec![1, 2, 3]);
    assert!((0.0..=1.0).contains(&result.accuracy.mean));
    assert!(result.accuracy.std_dev >= 0.0);
    assert!(result.time.std_dev >= 0.0);
    assert!(result.accuracy.min <= result.accuracy.mean);
    assert!(result.accuracy.mean <= result.accuracy.max);
}

/// Test that instances built from one prototype do not share state
#[test]
fn test_fresh_instances_are_independent() {
    let prototype = MlpConfig::linear().epochs(5);
    let mut trained = prototype.build(3);
    let untouched = prototype.build(3);

    let x = ndarray::array![[0.0f32, 0.0], [4.0, 4.0], [0.5, 0.0], [4.0, 3.5]];
    let y = ndarray::array![0usize, 1, 0, 1];
    trained.fit(x.view(), y.view()).unwrap();

    assert!(trained.predict(x.view()).is_ok());
    assert!(matches!(
        untouched.predict(x.view()),
        Err(ClassifierError::NotFitted)
    ));
}

/// Test that unknown implementation names are skipped without loading data
#[test]
fn test_unknown_names_only() {
    let source = CountingSource::new(blobs());
    let mut out = Vec::new();

    let report = benchmark(
        &tokens(&["adam"]),
        &settings(1, None),
        &registry(),
        &source,
        &mut out,
    )
    .unwrap();

    assert!(report.is_none());
    assert_eq!(source.fetches.get(), 0);
    assert!(out.is_empty());
}

/// Test that a missing MNIST directory surfaces as an error
#[test]
fn test_missing_mnist_files() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        dataset: "mnist-original".to_string(),
        data_dir: dir.path().to_path_buf(),
        ..settings(1, None)
    };

    let err = benchmark(
        &tokens(&["linear"]),
        &settings,
        &registry(),
        &Catalog::new(dir.path()),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("failed to load dataset 'mnist-original'"));
}

/// Test that a discovered configuration file feeds the effective settings
#[test]
fn test_config_file_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mnistbench.toml");
    std::fs::write(
        &path,
        "[runner]\nrepetitions = 2\nseed = 9\n\n[data]\ndataset = \"synthetic-blobs\"\n",
    )
    .unwrap();

    let discovered = BenchConfig::discover_from(dir.path()).unwrap();
    let config = BenchConfig::load(&discovered).unwrap();
    let cli = Cli {
        runs: Some(1),
        no_progress: true,
        ..Cli::default()
    };
    let settings = Settings::resolve(&cli, &config);

    assert_eq!(settings.repetitions, 1);
    assert_eq!(settings.seed, Some(9));
    assert_eq!(settings.dataset, SYNTHETIC_DATASET);
    assert!(!settings.progress);
}
