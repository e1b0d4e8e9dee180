//! Benchmark Execution
//!
//! The repetition loop. Every repetition asks the registration's factory for
//! a fresh instance, so no state carries over between runs:
//!
//! ```text
//! Registration ──build(seed)──▶ Box<dyn Classifier>
//!                                     │
//!                     Timer ┌─────────┴─────────┐
//!                           │ fit → predict → score │
//!                           └─────────┬─────────┘
//!                                     ▼
//!                       RunRecord (+ last predictions)
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use mnistbench_core::{BenchError, ClassifierError, Registration, Split, Timer, clock_seed};
use mnistbench_report::RunRecord;
use std::io::IsTerminal;

/// Where each repetition's seed comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Nanoseconds since the Unix epoch, read at the start of each repetition
    #[default]
    Clock,
    /// Repetition `i` (0-based) uses `base + i`
    Fixed(u64),
}

impl SeedPolicy {
    /// Policy for an optional configured seed
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or(Self::Clock, Self::Fixed)
    }

    /// Seed for the 1-based `repetition`
    pub fn seed_for(&self, repetition: usize) -> u64 {
        match *self {
            Self::Clock => clock_seed(),
            Self::Fixed(base) => base.wrapping_add(repetition.saturating_sub(1) as u64),
        }
    }
}

/// Configuration for benchmark execution
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repetitions per classifier, at least one
    pub repetitions: usize,
    /// Seed source
    pub seed: SeedPolicy,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            repetitions: 1,
            seed: SeedPolicy::Clock,
            show_progress: false,
        }
    }
}

impl RunnerConfig {
    /// Reject settings that cannot produce a report
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.repetitions == 0 {
            return Err(BenchError::InvalidConfig(
                "repetitions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything recorded while benchmarking one classifier
#[derive(Debug, Clone)]
pub struct ClassifierExecution {
    /// Registered display name
    pub name: String,
    /// One record per repetition, in order
    pub runs: Vec<RunRecord>,
    /// Test-set predictions of the final repetition
    pub last_predictions: Vec<usize>,
}

impl ClassifierExecution {
    /// Accuracy of every repetition
    pub fn accuracies(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.accuracy).collect()
    }

    /// Elapsed seconds of every repetition
    pub fn times(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.elapsed_secs).collect()
    }
}

/// Runs the repetition loop for each registration in order
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    /// Create a runner with the given settings
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Execute every registration; the first failure aborts the whole run.
    pub fn execute(
        &self,
        split: &Split,
        registrations: &[Registration],
    ) -> Result<Vec<ClassifierExecution>, BenchError> {
        self.config.validate()?;
        if registrations.is_empty() {
            return Ok(Vec::new());
        }

        let total = (registrations.len() * self.config.repetitions) as u64;
        let pb = if self.config.show_progress && std::io::stderr().is_terminal() {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        tracing::info!(
            classifiers = registrations.len(),
            repetitions = self.config.repetitions,
            train = split.train.len(),
            test = split.test.len(),
            "starting benchmark"
        );

        let mut executions = Vec::with_capacity(registrations.len());
        for registration in registrations {
            pb.set_message(registration.name.clone());
            match self.execute_single(registration, split, &pb) {
                Ok(execution) => executions.push(execution),
                Err(err) => {
                    pb.abandon_with_message(format!("{} failed", registration.name));
                    return Err(err);
                }
            }
        }

        pb.finish_and_clear();
        Ok(executions)
    }

    fn execute_single(
        &self,
        registration: &Registration,
        split: &Split,
        pb: &ProgressBar,
    ) -> Result<ClassifierExecution, BenchError> {
        tracing::debug!(
            name = %registration.name,
            factory = %registration.factory.describe(),
            "benchmarking classifier"
        );

        let mut runs = Vec::with_capacity(self.config.repetitions);
        let mut last_predictions = Vec::new();

        for repetition in 1..=self.config.repetitions {
            let seed = self.config.seed.seed_for(repetition);
            let fail = |source: ClassifierError| BenchError::Classifier {
                name: registration.name.clone(),
                repetition,
                source,
            };

            let mut classifier = registration.factory.build(seed);
            let timer = Timer::start();
            classifier
                .fit(split.train.features(), split.train.labels())
                .map_err(fail)?;
            let predictions = classifier.predict(split.test.features()).map_err(fail)?;
            let accuracy = classifier
                .score(split.test.features(), split.test.labels())
                .map_err(fail)?;
            let elapsed_secs = timer.stop_secs();

            tracing::debug!(
                name = %registration.name,
                repetition,
                seed,
                accuracy,
                elapsed_secs,
                "repetition complete"
            );

            runs.push(RunRecord {
                repetition,
                seed,
                elapsed_secs,
                accuracy,
            });
            last_predictions = predictions.to_vec();
            pb.inc(1);
        }

        Ok(ClassifierExecution {
            name: registration.name.clone(),
            runs,
            last_predictions,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use mnistbench_core::{Classifier, ClassifierFactory, Dataset, train_test_split};
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Predicts the most frequent training label and counts how often it is built
    pub(crate) struct Majority {
        pub(crate) builds: Arc<AtomicUsize>,
    }

    struct MajorityModel {
        label: Option<usize>,
    }

    impl Classifier for MajorityModel {
        fn fit(
            &mut self,
            _x: ArrayView2<'_, f32>,
            y: ArrayView1<'_, usize>,
        ) -> Result<(), ClassifierError> {
            assert!(self.label.is_none(), "instance reused across repetitions");
            let mut counts = std::collections::BTreeMap::new();
            for &label in y {
                *counts.entry(label).or_insert(0usize) += 1;
            }
            self.label = counts
                .into_iter()
                .max_by_key(|&(label, count)| (count, std::cmp::Reverse(label)))
                .map(|(label, _)| label);
            Ok(())
        }

        fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Array1<usize>, ClassifierError> {
            let label = self.label.ok_or(ClassifierError::NotFitted)?;
            Ok(Array1::from_elem(x.nrows(), label))
        }
    }

    impl ClassifierFactory for Majority {
        fn build(&self, _seed: u64) -> Box<dyn Classifier> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Box::new(MajorityModel { label: None })
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn fit(
            &mut self,
            _x: ArrayView2<'_, f32>,
            _y: ArrayView1<'_, usize>,
        ) -> Result<(), ClassifierError> {
            Err(ClassifierError::EmptyTrainingSet)
        }

        fn predict(&self, _x: ArrayView2<'_, f32>) -> Result<Array1<usize>, ClassifierError> {
            Err(ClassifierError::NotFitted)
        }
    }

    impl ClassifierFactory for Broken {
        fn build(&self, _seed: u64) -> Box<dyn Classifier> {
            Box::new(Broken)
        }
    }

    /// 20 samples, 2 features, labels 0 (12 of them) and 1 (8 of them)
    pub(crate) fn small_dataset() -> Dataset {
        let features = Array2::from_shape_fn((20, 2), |(i, j)| (i * 2 + j) as f32);
        let labels = Array1::from_shape_fn(20, |i| usize::from(i % 5 >= 3));
        Dataset::new(features, labels).unwrap()
    }

    pub(crate) fn small_split() -> Split {
        train_test_split(&small_dataset(), 0.25, 1234).unwrap()
    }

    fn majority(builds: &Arc<AtomicUsize>) -> Registration {
        Registration::new(
            "majority",
            Majority {
                builds: Arc::clone(builds),
            },
        )
    }

    #[test]
    fn test_seed_policy() {
        assert_eq!(SeedPolicy::Fixed(10).seed_for(1), 10);
        assert_eq!(SeedPolicy::Fixed(10).seed_for(3), 12);
        assert_eq!(SeedPolicy::Fixed(u64::MAX).seed_for(2), 0);
        assert_eq!(SeedPolicy::from_option(None), SeedPolicy::Clock);
        assert_eq!(SeedPolicy::from_option(Some(5)), SeedPolicy::Fixed(5));
    }

    #[test]
    fn test_fresh_instance_per_repetition() {
        let builds = Arc::new(AtomicUsize::new(0));
        let runner = Runner::new(RunnerConfig {
            repetitions: 4,
            seed: SeedPolicy::Fixed(7),
            show_progress: false,
        });

        let executions = runner.execute(&small_split(), &[majority(&builds)]).unwrap();

        assert_eq!(builds.load(Ordering::SeqCst), 4);
        let execution = &executions[0];
        assert_eq!(execution.name, "majority");
        let seeds: Vec<u64> = execution.runs.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![7, 8, 9, 10]);
        let repetitions: Vec<usize> = execution.runs.iter().map(|r| r.repetition).collect();
        assert_eq!(repetitions, vec![1, 2, 3, 4]);
        assert_eq!(execution.last_predictions.len(), 5);
        assert!(execution.accuracies().iter().all(|a| (0.0..=1.0).contains(a)));
        assert!(execution.times().iter().all(|t| *t >= 0.0));
    }

    #[test]
    fn test_empty_registrations_do_no_work() {
        let runner = Runner::new(RunnerConfig::default());
        assert!(runner.execute(&small_split(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        let builds = Arc::new(AtomicUsize::new(0));
        let runner = Runner::new(RunnerConfig {
            repetitions: 0,
            ..RunnerConfig::default()
        });

        let err = runner.execute(&small_split(), &[majority(&builds)]).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig(_)));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_aborts_run() {
        let builds = Arc::new(AtomicUsize::new(0));
        let registrations = vec![Registration::new("broken", Broken), majority(&builds)];
        let runner = Runner::new(RunnerConfig {
            repetitions: 2,
            ..RunnerConfig::default()
        });

        let err = runner.execute(&small_split(), &registrations).unwrap_err();
        match err {
            BenchError::Classifier {
                name, repetition, ..
            } => {
                assert_eq!(name, "broken");
                assert_eq!(repetition, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }
}
