pub mod file;
pub mod resolve;

pub use file::{InputConfig, OrgchartConfig, OutputConfig, OutputFormat};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config at {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{name} must be a single character, got {value:?}")]
    InvalidSeparator { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
