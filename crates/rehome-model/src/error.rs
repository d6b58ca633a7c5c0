//! Error types for typed record mapping.

use rehome_bencode::BencodeError;
use thiserror::Error;

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors produced while mapping decoded trees into typed records.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The underlying bencode document could not be decoded.
    #[error("bencode decode failed")]
    Decode {
        /// Underlying codec error.
        #[from]
        source: BencodeError,
    },
    /// The document's top level was not a dictionary.
    #[error("document root is not a dictionary")]
    NotADictionary,
    /// A recognized field held a value of the wrong shape.
    #[error("field has unexpected type")]
    FieldType {
        /// Source-format field tag that failed to map.
        field: &'static str,
    },
    /// A required field was absent.
    #[error("required field missing")]
    MissingField {
        /// Source-format field tag that was absent.
        field: &'static str,
    },
    /// An item identifier was not a fixed-length hexadecimal string.
    #[error("invalid item identifier")]
    InvalidItemId {
        /// The rejected identifier text.
        value: String,
    },
}
