use crate::error::{NbError, Result};
use crate::math::Array2;
use crate::models::gaussian_nb::GaussianNbModel;

/// Mean posterior score per class over all rows of `posteriors`.
///
/// `posteriors` must come from `model` (one column per class, ordered as
/// `model.classes()`). With zero rows every mean is `NaN`.
pub fn mean_class_posteriors(
    model: &GaussianNbModel,
    posteriors: &Array2<f64>,
) -> Result<Vec<(i32, f64)>> {
    let classes = model.classes();
    if posteriors.ncols() != classes.len() {
        return Err(NbError::invalid(format!(
            "posterior matrix has {} columns for {} classes",
            posteriors.ncols(),
            classes.len()
        )));
    }

    let n = posteriors.nrows() as f64;
    Ok(classes
        .into_iter()
        .enumerate()
        .map(|(col, label)| {
            let total: f64 = posteriors.rows().map(|row| row[col]).sum();
            (label, total / n)
        })
        .collect())
}
