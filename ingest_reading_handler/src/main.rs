mod artifacts;
mod config;
mod context;
mod handler;
mod model;
mod service;

use std::sync::Arc;

use anyhow::Context as _;
use config::Config;
use handler::handler;
use lambda_runtime::{
    Error, LambdaEvent, run, service_fn,
    tracing::{self},
};
use serde_json::Value;
use water_entrypoint::WaterEntrypoint;

#[tokio::main]
async fn main() -> Result<(), Error> {
    WaterEntrypoint::default().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!("initialized config");

    let aws_config = water_entrypoint::load_aws_config().await;

    // artifacts are loaded once per instance and reused by every warm invocation
    let s3 = service::s3::S3::new(aws_sdk_s3::Client::new(&aws_config));
    let predictor = artifacts::load_predictor(&s3, &config.artifacts)
        .await
        .context("could not load model artifacts")?;

    tracing::trace!("loaded model artifacts");

    let db = service::dynamodb::DynamoDB::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.readings_table,
    );

    let ctx = context::Context {
        db: Arc::new(db),
        predictor: Arc::new(predictor),
    };

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let ctx = ctx.clone();
        async move { handler(ctx, event).await }
    });

    run(func).await
}
