use std::sync::Arc;

use potability_model::DefaultPredictor;

use crate::service;

/// Dependencies created once per instance and shared by every invocation
#[derive(Clone)]
pub struct Context {
    pub db: Arc<service::dynamodb::DynamoDB>,
    pub predictor: Arc<DefaultPredictor>,
}
