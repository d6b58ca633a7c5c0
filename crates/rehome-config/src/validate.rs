//! Pre-flight checks on the migration directory layout.

use crate::error::{ConfigError, ConfigResult};
use crate::model::MigrationConfig;

/// Verify every path the migration depends on before any work is scheduled.
///
/// Checks, in order: the source directory, its `state` subdirectory, the
/// container file, and the destination directory. The first failure is
/// returned; nothing is created or repaired.
///
/// # Errors
///
/// Returns [`ConfigError::MissingDirectory`] or [`ConfigError::MissingFile`]
/// naming the first absent path.
pub fn validate_layout(config: &MigrationConfig) -> ConfigResult<()> {
    if !config.source_dir.is_dir() {
        return Err(ConfigError::MissingDirectory {
            role: "source",
            path: config.source_dir.clone(),
        });
    }
    let state_dir = config.state_dir();
    if !state_dir.is_dir() {
        return Err(ConfigError::MissingDirectory {
            role: "state",
            path: state_dir,
        });
    }
    let container = config.container_path();
    if !container.is_file() {
        return Err(ConfigError::MissingFile {
            role: "container",
            path: container,
        });
    }
    if !config.dest_dir.is_dir() {
        return Err(ConfigError::MissingDirectory {
            role: "destination",
            path: config.dest_dir.clone(),
        });
    }
    Ok(())
}
