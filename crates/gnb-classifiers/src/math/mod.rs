//! Small ndarray-like types used throughout the crate.
//!
//! Provides `Array2` (2D) and `Array1` (1D) containers over contiguous
//! storage with bounds-checked access and the handful of reductions the
//! classifier and the evaluator need.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
