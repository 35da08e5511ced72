use std::collections::BTreeMap;

use statrs::distribution::{Continuous, Normal};

use crate::config::{ModelConfig, ZeroVariancePolicy};
use crate::error::{NbError, Result};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::{ClassifierModel, Estimator, Predictor};

/// Per-class statistics estimated from a training set.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStatistics {
    pub label: i32,
    /// Fraction of training rows carrying `label`.
    pub prior: f64,
    pub mean: Vec<f64>,
    /// Population standard deviation (denominator = class count).
    pub std: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
enum FeatureDensity {
    Gaussian(Normal),
    PointMass(f64),
    Degenerate,
}

impl FeatureDensity {
    fn build(mean: f64, std: f64, policy: ZeroVariancePolicy) -> Result<Self> {
        let normal = |std: f64| {
            Normal::new(mean, std)
                .map(FeatureDensity::Gaussian)
                .map_err(|e| NbError::invalid(format!("invalid feature statistics: {}", e)))
        };

        match policy {
            ZeroVariancePolicy::Epsilon { min_std } => normal(std.max(min_std)),
            _ if std > 0.0 => normal(std),
            ZeroVariancePolicy::Exact => Ok(FeatureDensity::PointMass(mean)),
            ZeroVariancePolicy::Reject => Ok(FeatureDensity::Degenerate),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ClassModel {
    stats: ClassStatistics,
    densities: Vec<FeatureDensity>,
}

impl ClassModel {
    fn likelihood(&self, x: &[f64]) -> Result<f64> {
        let mut likelihood = 1.0;
        for (feature, (density, &value)) in self.densities.iter().zip(x.iter()).enumerate() {
            likelihood *= match density {
                FeatureDensity::Gaussian(normal) => normal.pdf(value),
                FeatureDensity::PointMass(mean) => {
                    if value == *mean {
                        1.0
                    } else {
                        0.0
                    }
                }
                FeatureDensity::Degenerate => {
                    return Err(NbError::DegenerateStatistics {
                        class: self.stats.label,
                        feature,
                    })
                }
            };
        }
        Ok(likelihood)
    }
}

/// Gaussian naive Bayes estimator.
///
/// `fit` returns a new [`GaussianNbModel`]; the estimator itself only holds
/// hyper-parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaussianNb {
    params: ModelConfig,
}

impl GaussianNb {
    pub fn new(params: ModelConfig) -> Self {
        GaussianNb { params }
    }

    pub fn params(&self) -> &ModelConfig {
        &self.params
    }
}

impl Estimator for GaussianNb {
    type Model = GaussianNbModel;

    fn fit(&self, x: &Array2<f64>, y: &[i32]) -> Result<GaussianNbModel> {
        if x.nrows() != y.len() {
            return Err(NbError::invalid(format!(
                "fit received {} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(NbError::invalid("fit requires at least one training sample"));
        }
        if x.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(NbError::invalid("training features must be finite"));
        }
        if let ZeroVariancePolicy::Epsilon { min_std } = self.params.zero_variance {
            if !(min_std > 0.0 && min_std.is_finite()) {
                return Err(NbError::invalid(format!(
                    "epsilon policy requires a positive min_std, got {}",
                    min_std
                )));
            }
        }

        let mut rows_by_class: BTreeMap<i32, Vec<&[f64]>> = BTreeMap::new();
        for (row, &label) in x.rows().zip(y) {
            rows_by_class.entry(label).or_default().push(row);
        }

        let n_samples = y.len() as f64;
        let n_features = x.ncols();
        let mut classes = Vec::with_capacity(rows_by_class.len());

        for (label, rows) in rows_by_class {
            let count = rows.len() as f64;

            let mut mean = vec![0.0; n_features];
            for row in &rows {
                for (m, v) in mean.iter_mut().zip(row.iter()) {
                    *m += v;
                }
            }
            mean.iter_mut().for_each(|m| *m /= count);

            let mut std = vec![0.0; n_features];
            for row in &rows {
                for ((s, v), m) in std.iter_mut().zip(row.iter()).zip(&mean) {
                    *s += (v - m).powi(2);
                }
            }
            std.iter_mut().for_each(|s| *s = (*s / count).sqrt());

            // A constant feature is degenerate even when summation left roundoff behind.
            for feature in 0..n_features {
                let first = rows[0][feature];
                if rows.iter().all(|row| row[feature] == first) {
                    mean[feature] = first;
                    std[feature] = 0.0;
                }
            }

            for (feature, _) in std.iter().enumerate().filter(|(_, &s)| s == 0.0) {
                log::warn!(
                    "Class {} has zero variance at feature {} ({:?} policy)",
                    label,
                    feature,
                    self.params.zero_variance
                );
            }

            let densities = mean
                .iter()
                .zip(&std)
                .map(|(&m, &s)| FeatureDensity::build(m, s, self.params.zero_variance))
                .collect::<Result<Vec<_>>>()?;

            let stats = ClassStatistics {
                label,
                prior: count / n_samples,
                mean,
                std,
            };
            log::debug!(
                "Class {}: prior {:.4}, mean {:?}, std {:?}",
                stats.label,
                stats.prior,
                stats.mean,
                stats.std
            );

            classes.push(ClassModel { stats, densities });
        }

        Ok(GaussianNbModel {
            classes,
            n_features,
        })
    }

    fn name(&self) -> &str {
        "gaussian_nb"
    }
}

/// Labels together with the posterior scores they were chosen from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub labels: Array1<i32>,
    /// `n_inputs x n_classes`, columns ordered as [`GaussianNbModel::classes`].
    pub posteriors: Array2<f64>,
}

/// A fitted Gaussian naive Bayes model. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNbModel {
    classes: Vec<ClassModel>,
    n_features: usize,
}

impl GaussianNbModel {
    /// Known labels in ascending order.
    pub fn classes(&self) -> Vec<i32> {
        self.classes.iter().map(|c| c.stats.label).collect()
    }

    pub fn statistics(&self) -> impl Iterator<Item = &ClassStatistics> + '_ {
        self.classes.iter().map(|c| &c.stats)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Unnormalized posterior `prior(c) * prod_i N(x_i; mean_ci, std_ci)` for
    /// every input row and class.
    pub fn posteriors(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.n_features {
            return Err(NbError::invalid(format!(
                "model was fitted on {} features but input has {}",
                self.n_features,
                x.ncols()
            )));
        }

        let mut scores = Vec::with_capacity(x.nrows() * self.classes.len());
        for row in x.rows() {
            for class in &self.classes {
                scores.push(class.stats.prior * class.likelihood(row)?);
            }
        }
        Ok(Array2::from_shape_vec((x.nrows(), self.classes.len()), scores)?)
    }

    pub fn predict_with_posteriors(&self, x: &Array2<f64>) -> Result<Prediction> {
        let posteriors = self.posteriors(x)?;
        let labels = posteriors
            .rows()
            .map(|scores| self.classes[argmax(scores)].stats.label)
            .collect();
        Ok(Prediction { labels, posteriors })
    }
}

impl Predictor for GaussianNbModel {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i32>> {
        Ok(self.predict_with_posteriors(x)?.labels)
    }
}

/// Index of the largest score; ties and NaN keep the earliest index.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = idx;
        }
    }
    best
}

/// Stateful wrapper around [`GaussianNb`] with an unfit/fitted lifecycle.
#[derive(Debug, Clone, Default)]
pub struct GaussianNaiveBayes {
    estimator: GaussianNb,
    model: Option<GaussianNbModel>,
}

impl GaussianNaiveBayes {
    pub fn new(estimator: GaussianNb) -> Self {
        GaussianNaiveBayes {
            estimator,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&GaussianNbModel> {
        self.model.as_ref()
    }

    fn fitted(&self) -> Result<&GaussianNbModel> {
        self.model.as_ref().ok_or(NbError::NotFitted)
    }
}

impl ClassifierModel for GaussianNaiveBayes {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        self.model = Some(self.estimator.fit(x, y)?);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i32>> {
        self.fitted()?.predict(x)
    }

    fn posteriors(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fitted()?.posteriors(x)
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn name(&self) -> &str {
        self.estimator.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> (Array2<f64>, Vec<i32>) {
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![
                1.0, 2.0, //
                2.0, 2.0, //
                3.0, 2.0, //
                10.0, 4.0, //
                11.0, 6.0, //
                12.0, 8.0,
            ],
        )
        .unwrap();
        (x, vec![0, 0, 0, 1, 1, 1])
    }

    #[test]
    fn fit_computes_priors_means_and_population_std() {
        let (x, y) = two_class();
        let model = GaussianNb::default().fit(&x, &y).unwrap();
        let stats: Vec<_> = model.statistics().cloned().collect();

        assert_eq!(stats.len(), 2);
        assert!((stats[0].prior - 0.5).abs() < 1e-12);
        assert!((stats[0].mean[0] - 2.0).abs() < 1e-12);
        // population std of {1, 2, 3} is sqrt(2/3)
        assert!((stats[0].std[0] - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats[0].std[1], 0.0);
        assert!((stats[1].mean[1] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn exact_policy_is_a_point_mass() {
        let (x, y) = two_class();
        let model = GaussianNb::default().fit(&x, &y).unwrap();
        let query = Array2::from_shape_vec((2, 2), vec![2.0, 2.0, 2.0, 2.5]).unwrap();
        let post = model.posteriors(&query).unwrap();

        assert!(post[(0, 0)] > 0.0);
        assert_eq!(post[(1, 0)], 0.0);
    }

    #[test]
    fn epsilon_policy_floors_std() {
        let (x, y) = two_class();
        let params = ModelConfig::new(ZeroVariancePolicy::Epsilon { min_std: 1e-3 });
        let model = GaussianNb::new(params).fit(&x, &y).unwrap();
        let query = Array2::from_shape_vec((1, 2), vec![2.0, 2.0005]).unwrap();
        let post = model.posteriors(&query).unwrap();
        assert!(post[(0, 0)] > 0.0);
        assert!(post[(0, 0)].is_finite());
    }

    #[test]
    fn epsilon_policy_raises_small_positive_std() {
        let x = Array2::from_shape_vec((4, 1), vec![1.0, 1.0 + 2e-6, 10.0, 11.0]).unwrap();
        let params = ModelConfig::new(ZeroVariancePolicy::Epsilon { min_std: 1e-3 });
        let model = GaussianNb::new(params).fit(&x, &[0, 0, 1, 1]).unwrap();

        let mean = model.statistics().next().unwrap().mean[0];
        let query = Array2::from_shape_vec((1, 1), vec![mean + 1e-4]).unwrap();
        let post = model.posteriors(&query).unwrap();

        // prior 0.5 times N(0.1; 0, 1) / 1e-3
        let expected = 0.5 * (-0.005f64).exp() / (1e-3 * (2.0 * std::f64::consts::PI).sqrt());
        assert!((post[(0, 0)] - expected).abs() < 1e-3 * expected);
    }

    #[test]
    fn constant_feature_with_roundoff_is_degenerate() {
        let x = Array2::from_shape_vec((5, 1), vec![0.1, 0.1, 0.1, 5.0, 6.0]).unwrap();
        let y = [0, 0, 0, 1, 1];

        let model = GaussianNb::default().fit(&x, &y).unwrap();
        let stats: Vec<_> = model.statistics().cloned().collect();
        assert_eq!(stats[0].mean[0], 0.1);
        assert_eq!(stats[0].std[0], 0.0);

        let query = Array2::from_shape_vec((1, 1), vec![0.1]).unwrap();
        let post = model.posteriors(&query).unwrap();
        assert!((post[(0, 0)] - 0.6).abs() < 1e-12);

        let reject = GaussianNb::new(ModelConfig::new(ZeroVariancePolicy::Reject))
            .fit(&x, &y)
            .unwrap();
        assert_eq!(
            reject.predict(&query),
            Err(NbError::DegenerateStatistics { class: 0, feature: 0 })
        );
    }

    #[test]
    fn reject_policy_surfaces_degenerate_statistics() {
        let (x, y) = two_class();
        let params = ModelConfig::new(ZeroVariancePolicy::Reject);
        let model = GaussianNb::new(params).fit(&x, &y).unwrap();
        let err = model.predict(&x).unwrap_err();
        assert_eq!(err, NbError::DegenerateStatistics { class: 0, feature: 1 });
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(argmax(&[0.1, 0.3, 0.3]), 1);
        assert_eq!(argmax(&[f64::NAN, 0.2]), 0);
    }

    #[test]
    fn feature_count_mismatch_is_invalid_input() {
        let (x, y) = two_class();
        let model = GaussianNb::default().fit(&x, &y).unwrap();
        let query = Array2::from_shape_vec((1, 3), vec![0.0; 3]).unwrap();
        assert!(matches!(model.predict(&query), Err(NbError::InvalidInput(_))));
    }

    #[test]
    fn stateful_wrapper_requires_fit() {
        let (x, y) = two_class();
        let mut clf = GaussianNaiveBayes::default();
        assert!(!clf.is_fitted());
        assert_eq!(clf.predict(&x), Err(NbError::NotFitted));

        clf.fit(&x, &y).unwrap();
        assert!(clf.is_fitted());
        assert_eq!(clf.predict(&x).unwrap().len(), 6);
    }
}
