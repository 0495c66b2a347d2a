use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue;
use lambda_http::http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;
use water_quality_models::{Coordinates, attributes};

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Missing reading_id in path")]
    MissingReadingId,
    #[error("Invalid or missing latitude/longitude in body. Must be numbers.")]
    InvalidCoordinates,
    #[error("Latitude/longitude has more digits than can be stored exactly.")]
    UnrepresentableCoordinates,
    #[error("Could not update item in database")]
    Store(anyhow::Error),
}

impl UpdateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpdateError::MissingReadingId
            | UpdateError::InvalidCoordinates
            | UpdateError::UnrepresentableCoordinates => StatusCode::BAD_REQUEST,
            UpdateError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            details: match self {
                UpdateError::Store(e) => Some(format!("{e:#}")),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: String,
    pub updated_attributes: BTreeMap<String, Box<RawValue>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Reads `latitude` and `longitude` from a JSON body.
/// An empty body is treated as an empty object.
pub fn parse_coordinates(body: &[u8]) -> Result<Coordinates, UpdateError> {
    let fields: HashMap<String, &RawValue> = if body.is_empty() {
        HashMap::new()
    } else {
        serde_json::from_slice(body).map_err(|_| UpdateError::InvalidCoordinates)?
    };

    let latitude = parse_coordinate(fields.get(attributes::LATITUDE).copied());
    let longitude = parse_coordinate(fields.get(attributes::LONGITUDE).copied());

    Ok(Coordinates {
        latitude: latitude?,
        longitude: longitude?,
    })
}

/// Works on the raw JSON text so numbers never pass through `f64`
fn parse_coordinate(value: Option<&RawValue>) -> Result<Decimal, UpdateError> {
    let raw = value.ok_or(UpdateError::InvalidCoordinates)?.get();

    let text = if raw.starts_with('"') {
        serde_json::from_str::<String>(raw).map_err(|_| UpdateError::InvalidCoordinates)?
    } else if raw.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        raw.to_string()
    } else {
        return Err(UpdateError::InvalidCoordinates);
    };

    parse_decimal(text.trim())
}

fn parse_decimal(text: &str) -> Result<Decimal, UpdateError> {
    if let Ok(decimal) = Decimal::from_str_exact(text).or_else(|_| Decimal::from_scientific(text)) {
        return Ok(decimal);
    }

    // well formed numbers that need more than the 96 bit mantissa
    let numeric = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        && text.parse::<f64>().is_ok();

    Err(if numeric {
        UpdateError::UnrepresentableCoordinates
    } else {
        UpdateError::InvalidCoordinates
    })
}

/// Converts the attributes returned by the store into plain JSON values.
/// Numbers keep the exact text the store returned.
pub fn render_attributes(
    stored: &HashMap<String, AttributeValue>,
) -> BTreeMap<String, Box<RawValue>> {
    stored
        .iter()
        .filter_map(|(name, value)| render_attribute(value).map(|v| (name.clone(), v)))
        .collect()
}

fn render_attribute(value: &AttributeValue) -> Option<Box<RawValue>> {
    let rendered = match value {
        AttributeValue::N(n) => RawValue::from_string(n.clone())
            .or_else(|_| quoted(n).and_then(RawValue::from_string)),
        AttributeValue::S(s) => quoted(s).and_then(RawValue::from_string),
        AttributeValue::Bool(b) => RawValue::from_string(b.to_string()),
        AttributeValue::Null(_) => RawValue::from_string("null".to_string()),
        _ => return None,
    };
    rendered.ok()
}

fn quoted(text: &str) -> serde_json::Result<String> {
    serde_json::to_string(text)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn numeric_strings_are_exact() {
        let coordinates = parse_coordinates(br#"{"latitude":"12.34","longitude":"56.78"}"#).unwrap();
        assert_eq!(coordinates.latitude.to_string(), "12.34");
        assert_eq!(coordinates.longitude.to_string(), "56.78");
    }

    #[test]
    fn numbers_are_converted_from_their_text() {
        let coordinates =
            parse_coordinates(br#"{"latitude":40.0,"longitude":-73.5}"#).unwrap();
        assert_eq!(coordinates.latitude, decimal("40"));
        assert_eq!(coordinates.longitude, decimal("-73.5"));

        let coordinates =
            parse_coordinates(br#"{"latitude":12.9716,"longitude":77.5946}"#).unwrap();
        assert_eq!(coordinates.latitude.to_string(), "12.9716");
        assert_eq!(coordinates.longitude.to_string(), "77.5946");
    }

    #[test]
    fn long_number_literals_keep_every_digit() {
        let coordinates = parse_coordinates(
            br#"{"latitude":40.00000000000000001,"longitude":12.345678901234567891}"#,
        )
        .unwrap();
        assert_eq!(coordinates.latitude.to_string(), "40.00000000000000001");
        assert_eq!(coordinates.longitude.to_string(), "12.345678901234567891");
    }

    #[test]
    fn scientific_notation_is_accepted() {
        let coordinates = parse_coordinates(br#"{"latitude":1e-7,"longitude":"2.5E1"}"#).unwrap();
        assert_eq!(coordinates.latitude, decimal("0.0000001"));
        assert_eq!(coordinates.longitude, decimal("25"));
    }

    #[test]
    fn rejects_missing_or_non_numeric_values() {
        let bodies: [&[u8]; 9] = [
            b"",
            br#"{}"#,
            br#"{"latitude":12.0}"#,
            br#"{"latitude":null,"longitude":1.0}"#,
            br#"{"latitude":"north","longitude":1.0}"#,
            br#"{"latitude":true,"longitude":1.0}"#,
            br#"{"latitude":[1.0],"longitude":1.0}"#,
            br#"[12.0, 1.0]"#,
            br#"not json"#,
        ];
        for body in bodies {
            assert!(
                matches!(parse_coordinates(body), Err(UpdateError::InvalidCoordinates)),
                "accepted {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn renders_numbers_as_json_numbers() {
        let stored = HashMap::from([
            (
                attributes::LATITUDE.to_string(),
                AttributeValue::N("40".to_string()),
            ),
            (
                attributes::LONGITUDE.to_string(),
                AttributeValue::N("-73.5".to_string()),
            ),
            (
                attributes::DEVICE_ID.to_string(),
                AttributeValue::S("dev1".to_string()),
            ),
        ]);

        let rendered = render_attributes(&stored);

        assert_eq!(rendered[attributes::LATITUDE].get(), "40");
        assert_eq!(rendered[attributes::LONGITUDE].get(), "-73.5");
        assert_eq!(rendered[attributes::DEVICE_ID].get(), r#""dev1""#);
    }

    #[test]
    fn rendered_numbers_keep_the_stored_text() {
        let stored = HashMap::from([(
            attributes::LATITUDE.to_string(),
            AttributeValue::N("12.3456789012345678901".to_string()),
        )]);

        let body = serde_json::to_string(&render_attributes(&stored)).unwrap();

        assert_eq!(body, r#"{"latitude":12.3456789012345678901}"#);
    }

    #[test]
    fn oversized_numbers_are_rejected_with_their_own_error() {
        let bodies: [&[u8]; 4] = [
            br#"{"latitude":1e30,"longitude":1.0}"#,
            br#"{"latitude":"1e30","longitude":1.0}"#,
            br#"{"latitude":1.0,"longitude":123456789012345678901234567890}"#,
            br#"{"latitude":0.12345678901234567890123456789012,"longitude":1.0}"#,
        ];
        for body in bodies {
            let err = parse_coordinates(body).unwrap_err();
            assert!(
                matches!(err, UpdateError::UnrepresentableCoordinates),
                "{}",
                String::from_utf8_lossy(body)
            );
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_errors_carry_details() {
        let err = UpdateError::Store(anyhow::anyhow!("throttled").context("update failed"));
        let response = err.to_response();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error, "Could not update item in database");
        assert_eq!(response.details.as_deref(), Some("update failed: throttled"));
    }
}
