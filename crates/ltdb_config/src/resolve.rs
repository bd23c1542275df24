//! Database root resolution from the environment or configuration.

use std::path::PathBuf;

/// Environment variable that overrides the configured database root.
pub const DATABASE_ENV_VAR: &str = "LTDB_DATABASE";

/// Resolves the database root directory.
///
/// Checks in order:
/// 1. The `LTDB_DATABASE` environment variable
/// 2. The provided `config_root` (from `ltdb.toml`)
///
/// Returns `None` if neither is set or the path doesn't exist.
pub fn resolve_database_root(config_root: Option<&str>) -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(DATABASE_ENV_VAR) {
        let p = PathBuf::from(env_path);
        if p.exists() {
            return Some(p);
        }
    }

    config_root.map(PathBuf::from).filter(|p| p.exists())
}
