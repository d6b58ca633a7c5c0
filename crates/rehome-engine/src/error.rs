//! # Design
//!
//! - Provide structured, constant-message errors for the translation
//!   pipeline.
//! - Capture operation context (paths, item stems) as fields to keep
//!   failures reproducible in tests.
//! - Preserve source errors without interpolating them into messages.

use std::io;
use std::path::PathBuf;

use rehome_model::ModelError;
use thiserror::Error;

/// Result type for translation operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors produced while translating one item.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The embedded resume record could not be decoded or mapped.
    #[error("embedded record decode failed")]
    Record {
        /// Underlying mapping error.
        source: ModelError,
    },
    /// The companion content descriptor file does not exist.
    #[error("content descriptor is missing")]
    MissingDescriptor {
        /// Path the pipeline looked for.
        path: PathBuf,
    },
    /// The companion content descriptor could not be decoded.
    #[error("content descriptor decode failed")]
    Descriptor {
        /// Path of the descriptor that failed to decode.
        path: PathBuf,
        /// Underlying mapping error.
        source: ModelError,
    },
    /// IO failure while reading inputs or persisting outputs.
    #[error("translation io failure")]
    Io {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
