use thiserror::Error;

use crate::math::ShapeError;

pub type Result<T> = std::result::Result<T, NbError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NbError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("classifier is not fitted, call fit before predict")]
    NotFitted,

    #[error("zero standard deviation for class {class} at feature {feature}")]
    DegenerateStatistics { class: i32, feature: usize },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl NbError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        NbError::InvalidInput(msg.into())
    }
}
