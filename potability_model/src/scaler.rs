use serde::Deserialize;

use crate::{FEATURE_COUNT, FeatureVector, ModelError};

/// A fitted, deterministic transform applied to features before classification
pub trait Scaler {
    /// Transform a feature vector. The output has the same shape as the input.
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, ModelError>;
}

/// Standardizes each feature by removing the fitted mean and dividing by the fitted scale
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Construct a scaler from fitted parameters
    pub fn new(
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    ) -> Result<Self, ModelError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Parse a scaler artifact of the form `{"mean": [..], "scale": [..]}`
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let scaler: Self = serde_json::from_slice(bytes)?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(ModelError::InvalidScaler(format!(
                "mean of feature {i} is not finite"
            )));
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(ModelError::InvalidScaler(format!(
                "scale of feature {i} must be finite and non-zero"
            )));
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, ModelError> {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in out.iter_mut().enumerate() {
            *value = (features.get(i) - self.mean[i]) / self.scale[i];
        }

        if out.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("scaling features"));
        }

        Ok(FeatureVector(out))
    }
}
