//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::LtdbConfig;
use std::path::Path;

/// Name of the configuration file looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "ltdb.toml";

/// Loads and validates `<dir>/ltdb.toml`.
pub fn load_config(dir: &Path) -> Result<LtdbConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `ltdb.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<LtdbConfig, ConfigError> {
    let config: LtdbConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &LtdbConfig) -> Result<(), ConfigError> {
    if config.database.root.trim().is_empty() {
        return Err(ConfigError::MissingField("database.root".to_string()));
    }
    Ok(())
}
