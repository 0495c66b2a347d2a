mod update_coordinates;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use lambda_http::tracing;
#[allow(unused_imports)]
use mockall::automock;
use water_quality_models::Coordinates;

#[cfg(not(test))]
pub use DynamodbClient as DynamoDB;

#[cfg(test)]
pub use MockDynamodbClient as DynamoDB;

#[derive(Debug, Clone)]
pub struct DynamodbClient {
    table: String,
    client: aws_sdk_dynamodb::Client,
}

#[cfg_attr(test, automock)]
impl DynamodbClient {
    pub fn new(client: aws_sdk_dynamodb::Client, table: String) -> Self {
        Self { table, client }
    }

    /// Sets the coordinates of a reading and returns the attributes that were written.
    /// The reading is not required to exist beforehand.
    #[tracing::instrument(skip(self))]
    pub async fn update_coordinates(
        &self,
        reading_id: &str,
        coordinates: Coordinates,
    ) -> anyhow::Result<HashMap<String, AttributeValue>> {
        update_coordinates::update_coordinates(&self.client, &self.table, reading_id, coordinates)
            .await
    }
}
