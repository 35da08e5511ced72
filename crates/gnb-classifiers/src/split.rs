//! Random train/test partitioning.
//!
//! Indices `0..n` are shuffled and the last `floor(n * test_fraction)` of the
//! permutation become the test set. Passing a seed makes the permutation
//! reproducible; without one the thread-local generator is used.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::data_handling::Dataset;
use crate::error::{NbError, Result};

/// Disjoint train/test index sets covering `0..n_samples`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

pub fn split_indices(n_samples: usize, test_fraction: f64, seed: Option<u64>) -> Result<Split> {
    if n_samples < 2 {
        return Err(NbError::invalid(format!(
            "cannot split {} samples, at least 2 are required",
            n_samples
        )));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(NbError::invalid(format!(
            "test_fraction must lie in (0, 1), got {}",
            test_fraction
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    match seed {
        Some(seed) => indices.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => indices.shuffle(&mut thread_rng()),
    }

    let n_test = (n_samples as f64 * test_fraction) as usize;
    let test = indices.split_off(n_samples - n_test);

    if test.is_empty() {
        log::warn!(
            "test_fraction {} of {} samples leaves an empty test partition",
            test_fraction,
            n_samples
        );
    }

    Ok(Split {
        train: indices,
        test,
    })
}

/// Split a dataset into `(train, test)` subsets.
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<(Dataset, Dataset)> {
    let split = split_indices(dataset.n_samples(), test_fraction, seed)?;
    Ok((dataset.subset(&split.train), dataset.subset(&split.test)))
}
