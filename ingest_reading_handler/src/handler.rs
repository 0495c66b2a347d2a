use chrono::Utc;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};
use serde_json::Value;
use uuid::Uuid;
use water_quality_models::{IngestRequest, PotabilityRecord};

use crate::{
    context::Context,
    model::{ErrorResponse, IngestAcknowledgement, IngestError, ProxyResponse},
};

const SUCCESS_MESSAGE: &str = "Data processed successfully";

/// Classifies and stores a single device reading.
/// Failures are reported in the response body rather than failing the invocation.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler(ctx: Context, event: LambdaEvent<Value>) -> Result<ProxyResponse, Error> {
    tracing::trace!(payload=?event.payload, "handler invoked");

    let response = match ingest_reading(&ctx, event.payload).await {
        Ok(reading_id) => {
            tracing::info!(reading_id=%reading_id, "stored reading");
            ProxyResponse::json(
                200,
                &IngestAcknowledgement {
                    message: SUCCESS_MESSAGE.to_string(),
                    reading_id: reading_id.to_string(),
                },
            )?
        }
        Err(e) => {
            tracing::error!(error=?e, "failed to process reading");
            ProxyResponse::json(
                500,
                &ErrorResponse {
                    error: e.to_string(),
                },
            )?
        }
    };

    Ok(response)
}

async fn ingest_reading(ctx: &Context, payload: Value) -> Result<Uuid, IngestError> {
    let request: IngestRequest = serde_json::from_value(payload)?;
    let reading = request.into_reading()?;

    let is_potable = ctx.predictor.predict(&reading)?;

    let reading_id = Uuid::new_v4();
    let record = PotabilityRecord::new(reading_id, Utc::now().timestamp(), &reading, is_potable);

    ctx.db
        .put_reading(&record)
        .await
        .map_err(IngestError::Store)?;

    Ok(reading_id)
}
