pub mod classifier_trait;
pub mod factory;
pub mod gaussian_nb;

pub use classifier_trait::{ClassifierModel, Estimator, Predictor};
pub use gaussian_nb::{ClassStatistics, GaussianNaiveBayes, GaussianNb, GaussianNbModel, Prediction};
