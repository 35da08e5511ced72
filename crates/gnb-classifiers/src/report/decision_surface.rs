use crate::data_handling::Dataset;
use crate::error::{NbError, Result};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::{Estimator, Predictor};

/// Grid spacing used when the caller has no preference.
pub const DEFAULT_GRID_STEP: f64 = 0.02;

const MAX_AXIS_POINTS: usize = 5_000;

/// Predicted label at every point of a regular grid over the first two features.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSurface {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    /// `ys.len() x xs.len()`; entry `(i, j)` is the label at `(xs[j], ys[i])`.
    pub labels: Array2<i32>,
}

impl DecisionSurface {
    /// Flatten into `(x, y, label)` triples, row by row.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, i32)> + '_ {
        self.labels.rows().zip(self.ys.iter()).flat_map(move |(row, &y)| {
            self.xs
                .iter()
                .zip(row.iter())
                .map(move |(&x, &label)| (x, y, label))
        })
    }
}

/// Refit `estimator` on feature columns 0 and 1 of `dataset` and predict a
/// grid spanning each axis from `min - 1` up to (excluding) `max + 1`.
pub fn decision_surface<E: Estimator>(
    estimator: &E,
    dataset: &Dataset,
    step: f64,
) -> Result<DecisionSurface> {
    if dataset.n_features() < 2 {
        return Err(NbError::invalid(format!(
            "decision surface needs 2 features, dataset has {}",
            dataset.n_features()
        )));
    }
    if !(step > 0.0 && step.is_finite()) {
        return Err(NbError::invalid(format!("grid step must be positive, got {}", step)));
    }
    if dataset.is_empty() {
        return Err(NbError::invalid("decision surface needs a non-empty dataset"));
    }

    let projected = dataset.project(0..2);
    let model = estimator.fit(projected.x(), projected.y().as_slice())?;

    let xs = axis(&projected.x().column(0), step)?;
    let ys = axis(&projected.x().column(1), step)?;
    log::debug!("Decision surface grid: {} x {} points", xs.len(), ys.len());

    let mut grid = Vec::with_capacity(xs.len() * ys.len() * 2);
    for &y in ys.iter() {
        for &x in xs.iter() {
            grid.push(x);
            grid.push(y);
        }
    }
    let grid = Array2::from_shape_vec((xs.len() * ys.len(), 2), grid)?;
    let labels = model.predict(&grid)?;
    let labels = Array2::from_shape_vec((ys.len(), xs.len()), Vec::from(labels))?;

    Ok(DecisionSurface { xs, ys, labels })
}

fn axis(values: &Array1<f64>, step: f64) -> Result<Array1<f64>> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let (start, end) = (min - 1.0, max + 1.0);

    let n = ((end - start) / step).ceil() as usize;
    if n > MAX_AXIS_POINTS {
        return Err(NbError::invalid(format!(
            "grid step {} gives {} points per axis, limit is {}",
            step, n, MAX_AXIS_POINTS
        )));
    }
    Ok((0..n).map(|i| start + i as f64 * step).collect())
}
