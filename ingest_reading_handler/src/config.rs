use std::path::PathBuf;

use anyhow::Context;
pub use water_entrypoint::Environment;

const DEFAULT_SCALER_KEY: &str = "scaler.json";
const DEFAULT_MODEL_KEY: &str = "model.json";
const DEFAULT_ARTIFACT_CACHE_DIR: &str = "/tmp";

/// Where the model artifacts live and where they are cached between warm invocations
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactConfig {
    /// The bucket holding the scaler and model artifacts
    pub bucket: String,

    /// Object key of the fitted scaler
    pub scaler_key: String,

    /// Object key of the trained classifier
    pub model_key: String,

    /// Local directory artifacts are cached in
    pub cache_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The table classified readings are written to
    pub readings_table: String,

    pub artifacts: ArtifactConfig,

    /// The environment we are in
    #[allow(dead_code)]
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let readings_table =
            lookup("READINGS_TABLE_NAME").context("READINGS_TABLE_NAME must be provided")?;

        let bucket = lookup("MODEL_BUCKET").context("MODEL_BUCKET must be provided")?;

        let scaler_key = lookup("SCALER_KEY").unwrap_or_else(|| DEFAULT_SCALER_KEY.to_string());
        let model_key = lookup("MODEL_KEY").unwrap_or_else(|| DEFAULT_MODEL_KEY.to_string());
        let cache_dir = lookup("ARTIFACT_CACHE_DIR")
            .unwrap_or_else(|| DEFAULT_ARTIFACT_CACHE_DIR.to_string())
            .into();

        Ok(Config {
            readings_table,
            artifacts: ArtifactConfig {
                bucket,
                scaler_key,
                model_key,
                cache_dir,
            },
            environment: Environment::new_or_prod(),
        })
    }
}
