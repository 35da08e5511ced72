//! Accuracy and confusion matrix over true/predicted label sequences.
use std::fmt;

use crate::data_handling::unique_sorted;
use crate::error::{NbError, Result};
use crate::math::Array2;

fn check_lengths(y_true: &[i32], y_pred: &[i32]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(NbError::invalid(format!(
            "y_true has {} labels but y_pred has {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

/// Fraction of positions where `y_true` and `y_pred` agree.
///
/// Returns `NaN` for empty input.
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    if y_true.is_empty() {
        return Ok(f64::NAN);
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Square count matrix indexed by sorted class labels.
///
/// Entry `(i, j)` counts samples whose true label is `classes[i]` and whose
/// predicted label is `classes[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    classes: Vec<i32>,
    counts: Array2<usize>,
}

impl ConfusionMatrix {
    /// All-zero matrix over `classes` (sorted and deduplicated here).
    pub fn zeros(classes: &[i32]) -> Self {
        let classes = unique_sorted(classes);
        let k = classes.len();
        ConfusionMatrix {
            classes,
            counts: Array2::zeros(k, k),
        }
    }

    pub fn classes(&self) -> &[i32] {
        &self.classes
    }

    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Count for a `(true, predicted)` label pair; `None` if either label is unknown.
    pub fn get(&self, true_label: i32, pred_label: i32) -> Option<usize> {
        let i = self.position(true_label)?;
        let j = self.position(pred_label)?;
        self.counts.get(i, j).copied()
    }

    pub fn diagonal_sum(&self) -> usize {
        (0..self.n_classes()).map(|i| self.counts[(i, i)]).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.as_slice().iter().sum()
    }

    fn position(&self, label: i32) -> Option<usize> {
        self.classes.binary_search(&label).ok()
    }

    fn record(&mut self, true_label: i32, pred_label: i32) {
        if let (Some(i), Some(j)) = (self.position(true_label), self.position(pred_label)) {
            self.counts[(i, j)] += 1;
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.counts)
    }
}

/// Confusion matrix over the classes present in `y_true`.
///
/// Predictions of a label absent from `y_true` are not counted anywhere.
pub fn confusion_matrix(y_true: &[i32], y_pred: &[i32]) -> Result<ConfusionMatrix> {
    confusion_matrix_with_classes(y_true, y_pred, &unique_sorted(y_true))
}

/// Confusion matrix over an explicit class set; pairs involving labels
/// outside `classes` are skipped.
pub fn confusion_matrix_with_classes(
    y_true: &[i32],
    y_pred: &[i32],
    classes: &[i32],
) -> Result<ConfusionMatrix> {
    check_lengths(y_true, y_pred)?;
    let mut matrix = ConfusionMatrix::zeros(classes);
    for (&t, &p) in y_true.iter().zip(y_pred) {
        matrix.record(t, p);
    }
    Ok(matrix)
}
