use serde::Deserialize;
use water_quality_models::Potability;

use crate::{FEATURE_COUNT, FeatureVector, ModelError, RegressionTree};

/// Assigns a potability label to a scaled feature vector
pub trait Classifier {
    /// Predict the label for a single, already scaled, row
    fn predict(&self, features: &FeatureVector) -> Result<Potability, ModelError>;
}

/// A member of a [VotingClassifier]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    /// Binary logistic regression
    Logistic {
        /// one weight per feature
        coefficients: [f64; FEATURE_COUNT],
        /// bias term
        intercept: f64,
    },
    /// Gradient boosted trees with a logistic link
    GradientBoosted {
        /// margin before any tree is added
        #[serde(default)]
        base_margin: f64,
        /// trees whose leaf values are summed into the margin
        trees: Vec<RegressionTree>,
    },
}

impl Estimator {
    fn validate(&self) -> Result<(), ModelError> {
        match self {
            Estimator::Logistic {
                coefficients,
                intercept,
            } => {
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::InvalidEnsemble(
                        "logistic parameters must be finite".to_string(),
                    ));
                }
            }
            Estimator::GradientBoosted { base_margin, trees } => {
                if !base_margin.is_finite() {
                    return Err(ModelError::InvalidEnsemble(
                        "base margin must be finite".to_string(),
                    ));
                }
                for (index, tree) in trees.iter().enumerate() {
                    tree.validate(index)?;
                }
            }
        }
        Ok(())
    }

    /// Probability that the sample is potable
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let margin = match self {
            Estimator::Logistic {
                coefficients,
                intercept,
            } => features.dot(coefficients) + intercept,
            Estimator::GradientBoosted { base_margin, trees } => {
                base_margin + trees.iter().map(|t| t.evaluate(features)).sum::<f64>()
            }
        };

        if margin.is_nan() {
            return Err(ModelError::NonFinite("computing estimator margin"));
        }

        Ok(sigmoid(margin))
    }
}

/// How the members of a [VotingClassifier] are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voting {
    /// Weighted majority of the member labels
    Hard,
    /// Weighted mean of the member probabilities
    Soft,
}

/// An ensemble that combines several estimators into one potability label.
/// Ties resolve to [Potability::NotPotable].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VotingClassifier {
    voting: Voting,
    #[serde(default)]
    weights: Option<Vec<f64>>,
    estimators: Vec<Estimator>,
}

impl VotingClassifier {
    /// Construct an ensemble, validating every member
    pub fn new(
        voting: Voting,
        weights: Option<Vec<f64>>,
        estimators: Vec<Estimator>,
    ) -> Result<Self, ModelError> {
        let classifier = Self {
            voting,
            weights,
            estimators,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Parse a model artifact of the form
    /// `{"voting": "soft", "weights": [..], "estimators": [{"type": "logistic", ..}, ..]}`
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let classifier: Self = serde_json::from_slice(bytes)?;
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.estimators.is_empty() {
            return Err(ModelError::InvalidEnsemble(
                "at least one estimator is required".to_string(),
            ));
        }

        if let Some(weights) = &self.weights {
            if weights.len() != self.estimators.len() {
                return Err(ModelError::InvalidEnsemble(format!(
                    "expected {} weights, got {}",
                    self.estimators.len(),
                    weights.len()
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(ModelError::InvalidEnsemble(
                    "weights must be finite and non-negative".to_string(),
                ));
            }
            if weights.iter().all(|w| *w == 0.0) {
                return Err(ModelError::InvalidEnsemble(
                    "at least one weight must be positive".to_string(),
                ));
            }
        }

        self.estimators.iter().try_for_each(Estimator::validate)
    }

    fn weighted(&self) -> impl Iterator<Item = (&Estimator, f64)> {
        self.estimators.iter().enumerate().map(|(i, estimator)| {
            let weight = self.weights.as_ref().map_or(1.0, |w| w[i]);
            (estimator, weight)
        })
    }
}

impl Classifier for VotingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Potability, ModelError> {
        let potable = match self.voting {
            Voting::Hard => {
                let (mut potable, mut not_potable) = (0.0, 0.0);
                for (estimator, weight) in self.weighted() {
                    if estimator.probability(features)? > 0.5 {
                        potable += weight;
                    } else {
                        not_potable += weight;
                    }
                }
                potable > not_potable
            }
            Voting::Soft => {
                let (mut total, mut weight_sum) = (0.0, 0.0);
                for (estimator, weight) in self.weighted() {
                    total += weight * estimator.probability(features)?;
                    weight_sum += weight;
                }
                total / weight_sum > 0.5
            }
        };

        tracing::trace!(?features, potable, "classified sample");

        Ok(if potable {
            Potability::Potable
        } else {
            Potability::NotPotable
        })
    }
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}
