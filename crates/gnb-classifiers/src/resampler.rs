//! Monte Carlo evaluation over repeated random train/test splits.
//!
//! Realization `r` splits with seed `r`, fits a fresh model on the train
//! part, and scores it on the test part. The summary reports the mean and
//! population standard deviation of the accuracies and picks the realization
//! whose accuracy lies closest to the mean as the representative one.
use std::fmt;

use crate::config::ResampleConfig;
use crate::data_handling::Dataset;
use crate::error::{NbError, Result};
use crate::math::Array1;
use crate::metrics::{accuracy, confusion_matrix, ConfusionMatrix};
use crate::models::classifier_trait::{Estimator, Predictor};
use crate::split::train_test_split;

/// Outcome of one split/fit/predict/evaluate cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Realization {
    pub seed: u64,
    pub n_train: usize,
    pub n_test: usize,
    /// `NaN` when the test partition is empty.
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResampleSummary {
    pub mean_accuracy: f64,
    pub std_accuracy: f64,
    pub best_index: usize,
    pub best_confusion_matrix: ConfusionMatrix,
    pub realizations: Vec<Realization>,
}

impl fmt::Display for ResampleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean accuracy: {}", self.mean_accuracy)?;
        writeln!(f, "Accuracy standard deviation: {}", self.std_accuracy)?;
        writeln!(f, "Representative realization (index): {}", self.best_index)?;
        write!(
            f,
            "Confusion matrix of the representative realization:\n{}",
            self.best_confusion_matrix
        )
    }
}

pub struct Resampler {
    config: ResampleConfig,
}

impl Resampler {
    pub fn new(config: ResampleConfig) -> Self {
        Resampler { config }
    }

    pub fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// Run every realization in order. The first error aborts the run.
    pub fn run<E: Estimator>(&self, estimator: &E, dataset: &Dataset) -> Result<ResampleSummary> {
        let repetitions = self.config.repetitions;
        if repetitions == 0 {
            return Err(NbError::invalid("repetitions must be at least 1"));
        }

        dataset.log_summary();
        log::info!(
            "Evaluating {} over {} realizations with test_fraction {}",
            estimator.name(),
            repetitions,
            self.config.test_fraction
        );

        let classes = dataset.classes();
        let realizations = (0..repetitions as u64)
            .map(|seed| self.realize(estimator, dataset, &classes, seed))
            .collect::<Result<Vec<_>>>()?;

        let accuracies: Array1<f64> = realizations.iter().map(|r| r.accuracy).collect();
        let mean_accuracy = accuracies.mean().unwrap_or(f64::NAN);
        let std_accuracy = accuracies.std_population().unwrap_or(f64::NAN);
        let best_index = closest_to(accuracies.as_slice(), mean_accuracy);

        log::info!(
            "Mean accuracy {:.4} (std {:.4}), representative realization {}",
            mean_accuracy,
            std_accuracy,
            best_index
        );

        Ok(ResampleSummary {
            mean_accuracy,
            std_accuracy,
            best_index,
            best_confusion_matrix: realizations[best_index].confusion_matrix.clone(),
            realizations,
        })
    }

    fn realize<E: Estimator>(
        &self,
        estimator: &E,
        dataset: &Dataset,
        classes: &[i32],
        seed: u64,
    ) -> Result<Realization> {
        let (train, test) = train_test_split(dataset, self.config.test_fraction, Some(seed))?;

        let model = estimator.fit(train.x(), train.y().as_slice())?;
        let y_pred = model.predict(test.x())?;

        let y_true = test.y().as_slice();
        let accuracy = accuracy(y_true, y_pred.as_slice())?;
        let confusion_matrix = if test.is_empty() {
            ConfusionMatrix::zeros(classes)
        } else {
            confusion_matrix(y_true, y_pred.as_slice())?
        };

        log::info!(
            "Realization {}: {} train / {} test samples, accuracy {:.4}",
            seed,
            train.n_samples(),
            test.n_samples(),
            accuracy
        );

        Ok(Realization {
            seed,
            n_train: train.n_samples(),
            n_test: test.n_samples(),
            accuracy,
            confusion_matrix,
        })
    }
}

/// Index minimizing `|values[i] - target|`, earliest index on ties.
fn closest_to(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, &v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best = idx;
            best_dist = dist;
        }
    }
    best
}
