use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Standard deviation floor under `ZeroVariancePolicy::Epsilon`
/// when none is configured.
pub const DEFAULT_MIN_STD: f64 = 1e-9;

/// How the Gaussian likelihood treats a feature that is constant within a class.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVariancePolicy {
    /// Point mass at the mean: density 1.0 when `x == mean`, 0.0 otherwise.
    Exact,
    /// Replace `std` with `max(std, min_std)`.
    Epsilon { min_std: f64 },
    /// Fail prediction with `NbError::DegenerateStatistics`.
    Reject,
}

impl Default for ZeroVariancePolicy {
    fn default() -> Self {
        ZeroVariancePolicy::Exact
    }
}

impl FromStr for ZeroVariancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(ZeroVariancePolicy::Exact),
            "epsilon" => Ok(ZeroVariancePolicy::Epsilon {
                min_std: DEFAULT_MIN_STD,
            }),
            "reject" => Ok(ZeroVariancePolicy::Reject),
            _ => Err(format!(
                "Unknown zero-variance policy: {}. Expected one of: exact, epsilon, reject",
                s
            )),
        }
    }
}

/// Hyper-parameters of the Gaussian naive Bayes model.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub zero_variance: ZeroVariancePolicy,
}

impl ModelConfig {
    pub fn new(zero_variance: ZeroVariancePolicy) -> Self {
        Self { zero_variance }
    }
}

/// Parameters of the repeated random-split evaluation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResampleConfig {
    pub repetitions: usize,
    pub test_fraction: f64,
    pub model: ModelConfig,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            repetitions: 20,
            test_fraction: 0.2,
            model: ModelConfig::default(),
        }
    }
}

impl ResampleConfig {
    pub fn new(repetitions: usize, test_fraction: f64, model: ModelConfig) -> Self {
        Self {
            repetitions,
            test_fraction,
            model,
        }
    }
}
