//! # Design
//!
//! - Provide structured, constant-message errors for run configuration.
//! - Capture context (paths, raw input) as fields rather than interpolating
//!   it into messages.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors produced while building or validating a migration run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A replacement rule entry did not split into exactly two components.
    #[error("replacement rule is not a 'from,to' pair")]
    InvalidRule {
        /// The raw rule entry as given on the command line.
        entry: String,
    },
    /// A directory the migration depends on does not exist.
    #[error("required directory is missing")]
    MissingDirectory {
        /// Which directory the layout check was looking for.
        role: &'static str,
        /// Path that failed the check.
        path: PathBuf,
    },
    /// A file the migration depends on does not exist.
    #[error("required file is missing")]
    MissingFile {
        /// Which file the layout check was looking for.
        role: &'static str,
        /// Path that failed the check.
        path: PathBuf,
    },
    /// An environment variable needed for platform defaults was absent.
    #[error("environment variable is not set")]
    MissingEnvironment {
        /// Name of the absent variable.
        variable: &'static str,
    },
}
