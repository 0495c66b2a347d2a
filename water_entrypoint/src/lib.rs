#![deny(missing_docs)]
//! This crate provides the initialization shared by every lambda binary in the workspace.
//! This is used to provide consistent behaviour with e.g. tracing configurations

mod environment;

pub use environment::{Environment, EnvironmentError};

use aws_config::{BehaviorVersion, Region, SdkConfig, meta::region::RegionProviderChain};
use tracing_subscriber::EnvFilter;

/// Region used when the default provider chain cannot resolve one
const FALLBACK_REGION: &str = "us-east-1";

/// unit struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct WaterEntrypoint {
    env: Environment,
}

impl Default for WaterEntrypoint {
    fn default() -> Self {
        WaterEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [WaterEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl WaterEntrypoint {
    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::trace!(environment = %self.env, "initialized entrypoint");

        InitializedEntrypoint(())
    }
}

/// Load the shared AWS SDK configuration, falling back to us-east-1 when no region is configured
pub async fn load_aws_config() -> SdkConfig {
    let region_provider =
        RegionProviderChain::default_provider().or_else(Region::new(FALLBACK_REGION));
    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}
