use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback used when a device does not identify itself
const UNKNOWN_DEVICE: &str = "unknown";

/// The raw sensor payload. Any reading may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    /// pH of the sample
    #[serde(default)]
    pub ph: Option<f64>,
    /// Total dissolved solids, ppm
    #[serde(default)]
    pub solids: Option<f64>,
    /// Turbidity, NTU
    #[serde(default)]
    pub turbidity: Option<f64>,
}

/// The event sent by a monitoring device to the ingestion lambda
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Identifier of the sending device
    #[serde(default)]
    pub device_id: Option<String>,
    /// The readings taken by the device
    #[serde(default)]
    pub data: Option<SensorData>,
}

/// One or more of the required readings were not supplied
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing one or more sensor readings: {}", .0.join(", "))]
pub struct MissingReadings(pub Vec<&'static str>);

/// A complete set of readings from a single device
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Identifier of the sending device
    pub device_id: String,
    /// pH of the sample
    pub ph: f64,
    /// Total dissolved solids, ppm
    pub solids: f64,
    /// Turbidity, NTU
    pub turbidity: f64,
}

impl IngestRequest {
    /// Check that every reading is present and produce a [SensorReading].
    /// A missing device id falls back to `"unknown"`.
    pub fn into_reading(self) -> Result<SensorReading, MissingReadings> {
        let data = self.data.unwrap_or_default();

        let (ph, solids, turbidity) = match (data.ph, data.solids, data.turbidity) {
            (Some(ph), Some(solids), Some(turbidity)) => (ph, solids, turbidity),
            (ph, solids, turbidity) => {
                let missing = [("ph", ph), ("solids", solids), ("turbidity", turbidity)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| name)
                    .collect();
                return Err(MissingReadings(missing));
            }
        };

        Ok(SensorReading {
            device_id: self
                .device_id
                .unwrap_or_else(|| UNKNOWN_DEVICE.to_string()),
            ph,
            solids,
            turbidity,
        })
    }
}

impl SensorReading {
    /// The readings in feature order: ph, solids, turbidity
    pub fn features(&self) -> [f64; 3] {
        [self.ph, self.solids, self.turbidity]
    }
}
