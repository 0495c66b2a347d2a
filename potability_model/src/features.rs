use water_quality_models::SensorReading;

/// Number of features the model is trained on
pub const FEATURE_COUNT: usize = 3;

/// A single row of model input, ordered as ph, solids, turbidity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    /// The value of the feature at `index`.
    /// Callers are expected to have validated the index against [FEATURE_COUNT].
    pub(crate) fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub(crate) fn dot(&self, weights: &[f64; FEATURE_COUNT]) -> f64 {
        self.0.iter().zip(weights).map(|(x, w)| x * w).sum()
    }
}

impl From<&SensorReading> for FeatureVector {
    fn from(reading: &SensorReading) -> Self {
        FeatureVector(reading.features())
    }
}
