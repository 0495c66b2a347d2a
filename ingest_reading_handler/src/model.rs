use potability_model::ModelError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use water_quality_models::MissingReadings;

/// The response shape expected by an API Gateway lambda proxy integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    /// JSON encoded response body
    pub body: String,
}

impl ProxyResponse {
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> serde_json::Result<Self> {
        Ok(Self {
            status_code,
            body: serde_json::to_string(body)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestAcknowledgement {
    pub message: String,
    pub reading_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything that can go wrong while ingesting a reading.
/// Every variant is reported to the caller as a server error.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
    #[error(transparent)]
    MissingReadings(#[from] MissingReadings),
    #[error("prediction failed: {0}")]
    Prediction(#[from] ModelError),
    #[error("{0:#}")]
    Store(anyhow::Error),
}
