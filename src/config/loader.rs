//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::FileConfig;

/// Error type for configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to create handler script {}: {source}", path.display())]
    CreateScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no usable script routes after resolution")]
    NoRoutes,
}

/// Load and deserialize the YAML config file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
    let config: FileConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}
