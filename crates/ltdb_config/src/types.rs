//! Configuration types deserialized from `ltdb.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration parsed from `ltdb.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LtdbConfig {
    /// Location of the device database.
    pub database: DatabaseConfig,
}

/// The `[database]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Directory containing `devices.json` and the family subdirectories.
    pub root: String,
}

impl DatabaseConfig {
    /// Returns the configured root as a path.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }
}
