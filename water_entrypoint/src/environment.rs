use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Name of the variable the environment is read from
const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The current environment the application is running in
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// The lambda is running locally, e.g. under cargo lambda watch
    Local,
}

/// An error which can occur when constructing an [Environment]
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// the variable could not be read
    #[error("An error occurred while reading envvar: ENVIRONMENT. Err: {0}")]
    VarErr(#[from] std::env::VarError),
    /// the input string value was not recognized as a valid env
    #[error("Could not convert {0} into an environment value")]
    InvalidValue(String),
}

impl Environment {
    /// Attempt to construct a new version of [Environment] from the environment variables
    #[tracing::instrument(err, level = tracing::Level::TRACE)]
    pub fn new_from_env() -> Result<Self, EnvironmentError> {
        let v = std::env::var(ENVIRONMENT_VAR)?;
        Self::from_str(&v)
    }

    /// attempt to create a new [Environment] falling back to production if we fail to construct
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    fn from_str(environment: &str) -> Result<Self, EnvironmentError> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(EnvironmentError::InvalidValue(s.to_string())),
        }
    }
}
