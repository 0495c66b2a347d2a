use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The outcome of classifying a water sample.
/// Stored as the integer label `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Potability {
    /// The sample is not safe to drink
    NotPotable,
    /// The sample is safe to drink
    Potable,
}

/// A label outside of `{0, 1}` was supplied
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown potability label {0}, expected 0 or 1")]
pub struct UnknownLabel(pub i64);

impl Potability {
    /// The integer label persisted for this value
    pub fn label(self) -> u8 {
        match self {
            Potability::NotPotable => 0,
            Potability::Potable => 1,
        }
    }

    /// Attempt to convert an integer label into a [Potability]
    pub fn from_label(label: i64) -> Result<Self, UnknownLabel> {
        match label {
            0 => Ok(Potability::NotPotable),
            1 => Ok(Potability::Potable),
            other => Err(UnknownLabel(other)),
        }
    }
}

impl Serialize for Potability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.label())
    }
}

impl<'de> Deserialize<'de> for Potability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = i64::deserialize(deserializer)?;
        Potability::from_label(label).map_err(serde::de::Error::custom)
    }
}
