#![deny(missing_docs)]
//! Shared record schema for the water quality readings table.
//!
//! Both the ingestion and the update lambdas write to items shaped like [PotabilityRecord],
//! and address its attributes through the names in [attributes].

/// Attribute names of a stored reading
pub mod attributes;
mod potability;
mod reading;
mod record;

pub use potability::{Potability, UnknownLabel};
pub use reading::{IngestRequest, MissingReadings, SensorData, SensorReading};
pub use record::{Coordinates, PotabilityRecord};
