use anyhow::Context;
pub use water_entrypoint::Environment;

#[derive(Debug, Clone)]
pub struct Config {
    /// The table holding the readings whose coordinates are updated
    pub readings_table: String,

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

        Ok(Config {
            readings_table,
            environment: Environment::new_or_prod(),
        })
    }
}
