use crate::error::Result;
use crate::math::{Array1, Array2};

/// Something that can be fitted to labelled data, producing an immutable model.
///
/// Fitting never mutates the estimator, so one estimator can be shared by
/// every realization of a resampling run.
pub trait Estimator {
    type Model: Predictor;

    fn fit(&self, x: &Array2<f64>, y: &[i32]) -> Result<Self::Model>;

    /// Optional human readable name for the estimator
    fn name(&self) -> &str {
        "estimator"
    }
}

/// A fitted model mapping feature rows to class labels.
pub trait Predictor {
    /// One label per row of `x`, in row order.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i32>>;
}

/// Stateful classifier contract: `fit` replaces the internal state and
/// `predict` fails with `NbError::NotFitted` until `fit` has succeeded once.
pub trait ClassifierModel {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()>;

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i32>>;

    /// Unnormalized per-class posterior scores, one row per input.
    fn posteriors(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    fn is_fitted(&self) -> bool;

    fn name(&self) -> &str {
        "classifier"
    }
}
