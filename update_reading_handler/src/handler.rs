use lambda_http::{
    Body, Error, Request, RequestExt, Response,
    http::{
        StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
    },
    tracing::{self},
};
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::value::RawValue;
use water_quality_models::attributes;

use crate::{
    model::{UpdateError, UpdateResponse, parse_coordinates, render_attributes},
    service::dynamodb::DynamoDB,
};

const SUCCESS_MESSAGE: &str = "Coordinates updated successfully";

/// Tags a stored reading with the coordinates it was taken at.
/// Every response, including errors, allows any origin since the map front end is served elsewhere.
#[tracing::instrument(skip_all)]
pub async fn handler(db: &DynamoDB, event: Request) -> Result<Response<Body>, Error> {
    tracing::trace!(event=?event, "handler invoked");

    match update_reading(db, &event).await {
        Ok(updated_attributes) => json_response(
            StatusCode::OK,
            true,
            &UpdateResponse {
                message: SUCCESS_MESSAGE.to_string(),
                updated_attributes,
            },
        ),
        Err(e) => {
            match &e {
                UpdateError::Store(err) => {
                    tracing::error!(error=?err, "failed to update reading");
                }
                _ => tracing::warn!(error=%e, "rejected update request"),
            }
            json_response(e.status_code(), false, &e.to_response())
        }
    }
}

async fn update_reading(db: &DynamoDB, event: &Request) -> Result<BTreeMap<String, Box<RawValue>>, UpdateError> {
    let path_parameters = event.path_parameters();
    let reading_id = path_parameters
        .first(attributes::READING_ID)
        .filter(|id| !id.is_empty())
        .ok_or(UpdateError::MissingReadingId)?;

    let coordinates = parse_coordinates(event.body().as_ref())?;

    tracing::trace!(reading_id=%reading_id, coordinates=?coordinates, "updating coordinates");

    let updated = db
        .update_coordinates(reading_id, coordinates)
        .await
        .map_err(UpdateError::Store)?;

    Ok(render_attributes(&updated))
}

fn json_response<T: Serialize>(
    status: StatusCode,
    preflight_headers: bool,
    body: &T,
) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*");

    if preflight_headers {
        builder = builder
            .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
            .header(ACCESS_CONTROL_ALLOW_METHODS, "PUT, OPTIONS");
    }

    Ok(builder.body(Body::from(serde_json::to_string(body)?))?)
}
