mod config;
mod handler;
mod model;
mod service;

use anyhow::Context;
use config::Config;
use handler::handler;
use lambda_http::{
    Error, Request, run, service_fn,
    tracing::{self},
};
use service::dynamodb::DynamoDB;
use water_entrypoint::WaterEntrypoint;

#[tokio::main]
async fn main() -> Result<(), Error> {
    WaterEntrypoint::default().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!("initialized config");

    let aws_config = water_entrypoint::load_aws_config().await;
    let db = &DynamoDB::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.readings_table,
    );

    tracing::trace!("initialized db client");

    let func = service_fn(move |event: Request| async move { handler(db, event).await });
    run(func).await
}
