//! Configuration for the tag trend pipeline.
//!
//! Process settings come from the environment ([`load_app_config`]); the
//! aggregation parameters come from a YAML file ([`load_trends_config`]).

mod app_config;
mod config;
mod trends;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use trends::{load_trends_config, parse_trends_config, TrendsConfig, REQUIRED_COLUMNS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ConfigFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
