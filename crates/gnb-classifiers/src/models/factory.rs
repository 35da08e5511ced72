use crate::config::ModelConfig;
use crate::models::gaussian_nb::{GaussianNaiveBayes, GaussianNb};

/// Build the estimator described by a `ModelConfig`.
pub fn build_model(params: &ModelConfig) -> GaussianNb {
    GaussianNb::new(params.clone())
}

/// Build an unfitted stateful classifier from a `ModelConfig`.
pub fn build_classifier(params: &ModelConfig) -> GaussianNaiveBayes {
    GaussianNaiveBayes::new(build_model(params))
}
