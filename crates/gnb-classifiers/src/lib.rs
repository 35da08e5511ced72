//! gnb-classifiers: Gaussian naive Bayes with repeated random-split evaluation.
//!
//! The crate fits per-class Gaussian feature statistics, predicts by
//! maximizing the unnormalized posterior, and estimates accuracy by
//! repeating seeded train/test splits. It also prepares the payloads an
//! external plotting tool needs (mean posteriors, decision-region grids)
//! without rendering anything itself.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod metrics;
pub mod models;
pub mod report;
pub mod resampler;
pub mod split;

pub use error::{NbError, Result};
