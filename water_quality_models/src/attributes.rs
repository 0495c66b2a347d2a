/// Partition key of the readings table
pub const READING_ID: &str = "reading_id";
/// Identifier of the device that sent the reading
pub const DEVICE_ID: &str = "device_id";
/// Seconds since the unix epoch at which the reading was processed
pub const TIMESTAMP_UTC: &str = "timestamp_utc";
/// pH reading, two decimal places
pub const PH: &str = "ph";
/// Total dissolved solids reading, two decimal places
pub const SOLIDS: &str = "solids";
/// Turbidity reading, two decimal places
pub const TURBIDITY: &str = "turbidity";
/// Predicted potability label, 0 or 1
pub const IS_POTABLE: &str = "is_potable";
/// Latitude, only present once a reading has been tagged
pub const LATITUDE: &str = "latitude";
/// Longitude, only present once a reading has been tagged
pub const LONGITUDE: &str = "longitude";
