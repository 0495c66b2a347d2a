use water_quality_models::{Potability, SensorReading};

use crate::{Classifier, FeatureVector, ModelError, Scaler, StandardScaler, VotingClassifier};

/// The predictor built from the standard scaler and voting ensemble artifacts
pub type DefaultPredictor = PotabilityPredictor<StandardScaler, VotingClassifier>;

/// Scales a reading and classifies it.
///
/// Built once at cold start and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PotabilityPredictor<S, C> {
    scaler: S,
    classifier: C,
}

impl<S: Scaler, C: Classifier> PotabilityPredictor<S, C> {
    /// Pair a fitted scaler with the classifier trained on its output
    pub fn new(scaler: S, classifier: C) -> Self {
        Self { scaler, classifier }
    }

    /// Classify a single reading
    #[tracing::instrument(skip(self), err, level = tracing::Level::DEBUG)]
    pub fn predict(&self, reading: &SensorReading) -> Result<Potability, ModelError> {
        let features = FeatureVector::from(reading);
        let scaled = self.scaler.transform(&features)?;
        self.classifier.predict(&scaled)
    }
}

impl DefaultPredictor {
    /// Build a predictor from the raw bytes of the scaler and model artifacts
    pub fn from_artifacts(scaler: &[u8], model: &[u8]) -> Result<Self, ModelError> {
        Ok(Self::new(
            StandardScaler::from_json(scaler)?,
            VotingClassifier::from_json(model)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALER: &[u8] = br#"{"mean":[7.0,22000.0,4.0],"scale":[1.5,8700.0,0.8]}"#;
    const MODEL: &[u8] = br#"{
        "voting": "soft",
        "estimators": [
            {"type": "logistic", "coefficients": [0.0, -0.8, -1.2], "intercept": 0.0}
        ]
    }"#;

    fn reading(ph: f64, solids: f64, turbidity: f64) -> SensorReading {
        SensorReading {
            device_id: "dev1".to_string(),
            ph,
            solids,
            turbidity,
        }
    }

    #[test]
    fn scales_before_classifying() {
        let predictor = DefaultPredictor::from_artifacts(SCALER, MODEL).unwrap();

        assert_eq!(
            predictor.predict(&reading(7.0, 300.0, 3.5)).unwrap(),
            Potability::Potable
        );
        assert_eq!(
            predictor.predict(&reading(7.0, 40000.0, 6.0)).unwrap(),
            Potability::NotPotable
        );
    }

    #[test]
    fn identical_readings_give_identical_labels() {
        let predictor = DefaultPredictor::from_artifacts(SCALER, MODEL).unwrap();
        let sample = reading(6.4, 18000.0, 4.1);
        let expected = predictor.predict(&sample).unwrap();

        let reloaded = DefaultPredictor::from_artifacts(SCALER, MODEL).unwrap();
        assert_eq!(reloaded.predict(&sample).unwrap(), expected);
        assert_eq!(predictor.predict(&sample.clone()).unwrap(), expected);
    }

    #[test]
    fn bad_artifacts_fail_to_load() {
        assert!(DefaultPredictor::from_artifacts(b"not json", MODEL).is_err());
        assert!(DefaultPredictor::from_artifacts(SCALER, b"{}").is_err());
    }
}
