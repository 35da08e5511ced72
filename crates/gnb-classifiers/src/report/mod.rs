//! Data handed to external plotting code. Nothing here renders.
//!
//! `posteriors` summarizes per-class posterior scores for a bar chart and
//! `decision_surface` evaluates a refitted two-feature model on a regular
//! grid for a decision-region plot.
pub mod decision_surface;
pub mod posteriors;

pub use decision_surface::{decision_surface, DecisionSurface, DEFAULT_GRID_STEP};
pub use posteriors::mean_class_posteriors;
