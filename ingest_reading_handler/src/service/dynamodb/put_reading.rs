use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use water_quality_models::PotabilityRecord;

pub async fn put_reading(
    client: &Client,
    table: &str,
    record: &PotabilityRecord,
) -> anyhow::Result<()> {
    let item = reading_item(record)?;

    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await
        .context("could not put reading, dynamodb")?;

    Ok(())
}

fn reading_item(record: &PotabilityRecord) -> anyhow::Result<HashMap<String, AttributeValue>> {
    serde_dynamo::to_item(record).context("failed to convert reading into an item")
}

#[cfg(test)]
mod tests {
    use super::*;
    use water_quality_models::{Potability, SensorReading, attributes};

    #[test]
    fn item_uses_the_shared_attribute_names() {
        let reading = SensorReading {
            device_id: "dev1".to_string(),
            ph: 7.0,
            solids: 300.0,
            turbidity: 3.5,
        };
        let reading_id = uuid::Uuid::new_v4();
        let record = PotabilityRecord::new(reading_id, 1_700_000_000, &reading, Potability::Potable);

        let item = reading_item(&record).unwrap();

        assert_eq!(
            item.get(attributes::READING_ID),
            Some(&AttributeValue::S(reading_id.to_string()))
        );
        assert_eq!(
            item.get(attributes::DEVICE_ID),
            Some(&AttributeValue::S("dev1".to_string()))
        );
        assert_eq!(
            item.get(attributes::TIMESTAMP_UTC),
            Some(&AttributeValue::N("1700000000".to_string()))
        );
        assert_eq!(
            item.get(attributes::PH),
            Some(&AttributeValue::S("7.00".to_string()))
        );
        assert_eq!(
            item.get(attributes::SOLIDS),
            Some(&AttributeValue::S("300.00".to_string()))
        );
        assert_eq!(
            item.get(attributes::TURBIDITY),
            Some(&AttributeValue::S("3.50".to_string()))
        );
        assert_eq!(
            item.get(attributes::IS_POTABLE),
            Some(&AttributeValue::N("1".to_string()))
        );
        assert!(!item.contains_key(attributes::LATITUDE));
        assert!(!item.contains_key(attributes::LONGITUDE));
    }
}
