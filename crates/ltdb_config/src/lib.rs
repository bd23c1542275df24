//! Parsing of `ltdb.toml` and resolution of the database root directory.
//!
//! The database root is the directory holding `devices.json` and the
//! per-family subdirectories. It is taken from the `LTDB_DATABASE`
//! environment variable when set, otherwise from `[database] root` in
//! `ltdb.toml`.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_database_root, DATABASE_ENV_VAR};
pub use types::*;
