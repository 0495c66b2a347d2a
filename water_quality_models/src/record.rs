use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Potability, SensorReading};

/// A classified reading as stored in the readings table.
///
/// Items are created once at ingestion time without coordinates. The coordinates are
/// attached later by the update lambda, which writes them as exact numeric attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotabilityRecord {
    /// Generated primary key
    pub reading_id: String,
    /// Identifier of the device that sent the reading
    pub device_id: String,
    /// Seconds since the unix epoch
    pub timestamp_utc: i64,
    /// pH, formatted to two decimal places
    pub ph: String,
    /// Total dissolved solids, formatted to two decimal places
    pub solids: String,
    /// Turbidity, formatted to two decimal places
    pub turbidity: String,
    /// Predicted potability
    pub is_potable: Potability,
    /// Latitude of the sampling site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Decimal>,
    /// Longitude of the sampling site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Decimal>,
}

impl PotabilityRecord {
    /// Build a freshly ingested record. Coordinates are always absent.
    pub fn new(
        reading_id: Uuid,
        timestamp_utc: i64,
        reading: &SensorReading,
        is_potable: Potability,
    ) -> Self {
        Self {
            reading_id: reading_id.to_string(),
            device_id: reading.device_id.clone(),
            timestamp_utc,
            ph: format_reading(reading.ph),
            solids: format_reading(reading.solids),
            turbidity: format_reading(reading.turbidity),
            is_potable,
            latitude: None,
            longitude: None,
        }
    }
}

/// The location a reading was taken at, held as exact decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: Decimal,
    /// Longitude in decimal degrees
    pub longitude: Decimal,
}

fn format_reading(value: f64) -> String {
    format!("{value:.2}")
}
