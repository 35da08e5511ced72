//! Dataset container shared by the splitter, the classifier and the resampler.
//!
//! A `Dataset` pairs an `n_samples x n_features` matrix with one integer
//! class label per row. It is immutable once built; subsets are new values.
use std::collections::BTreeSet;
use std::ops::RangeBounds;

use crate::error::{NbError, Result};
use crate::math::{Array1, Array2};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<i32>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<i32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(NbError::invalid(format!(
                "feature matrix has {} rows but {} labels were given",
                x.nrows(),
                y.len()
            )));
        }
        Ok(Dataset { x, y })
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<i32> {
        &self.y
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    /// Sorted unique labels.
    pub fn classes(&self) -> Vec<i32> {
        unique_sorted(self.y.as_slice())
    }

    /// Rows at `indices`, in the order given.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select_rows(indices),
            y: self.y.select(indices),
        }
    }

    /// Keep only a contiguous range of feature columns.
    pub fn project<R: RangeBounds<usize>>(&self, features: R) -> Dataset {
        Dataset {
            x: self.x.select_columns(features),
            y: self.y.clone(),
        }
    }

    pub fn log_summary(&self) {
        let classes = self.classes();
        log::debug!(
            "Dataset: {} samples, {} features, {} classes {:?}",
            self.n_samples(),
            self.n_features(),
            classes.len(),
            classes
        );
    }
}

pub(crate) fn unique_sorted(labels: &[i32]) -> Vec<i32> {
    labels
        .iter()
        .copied()
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect()
}
