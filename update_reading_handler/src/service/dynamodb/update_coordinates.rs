use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use water_quality_models::{Coordinates, attributes};

pub async fn update_coordinates(
    client: &Client,
    table: &str,
    reading_id: &str,
    coordinates: Coordinates,
) -> anyhow::Result<HashMap<String, AttributeValue>> {
    let (latitude, longitude) = coordinate_values(&coordinates);

    let output = client
        .update_item()
        .table_name(table)
        .key(attributes::READING_ID, AttributeValue::S(reading_id.to_owned()))
        .update_expression("SET #lat = :lat, #lon = :lon")
        .expression_attribute_names("#lat", attributes::LATITUDE)
        .expression_attribute_names("#lon", attributes::LONGITUDE)
        .expression_attribute_values(":lat", latitude)
        .expression_attribute_values(":lon", longitude)
        .return_values(ReturnValue::UpdatedNew)
        .send()
        .await
        .context("failed to update reading coordinates")?;

    Ok(output.attributes.unwrap_or_default())
}

/// Coordinates are written as numbers using their exact decimal text
fn coordinate_values(coordinates: &Coordinates) -> (AttributeValue, AttributeValue) {
    (
        AttributeValue::N(coordinates.latitude.to_string()),
        AttributeValue::N(coordinates.longitude.to_string()),
    )
}
