//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HealthConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HealthConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: HealthConfig = toml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &HealthConfig) -> Result<(), ConfigError> {
    if config.listener.bind_address.is_empty() {
        return Err(ConfigError::Validation(
            "listener.bind_address must not be empty".to_string(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "listener.request_timeout_secs must be at least 1".to_string(),
        ));
    }
    for (field, path) in [
        ("endpoint.health_path", &config.endpoint.health_path),
        ("endpoint.live_path", &config.endpoint.live_path),
        ("endpoint.ready_path", &config.endpoint.ready_path),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{field} must start with '/'"
            )));
        }
    }
    Ok(())
}
