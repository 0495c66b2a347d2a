mod put_reading;

use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use water_quality_models::PotabilityRecord;

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

    /// Inserts a newly classified reading, overwriting any item with the same id
    #[tracing::instrument(skip(self))]
    pub async fn put_reading(&self, record: &PotabilityRecord) -> anyhow::Result<()> {
        put_reading::put_reading(&self.client, &self.table, record).await
    }
}
