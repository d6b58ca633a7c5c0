//! Structured, constant-message errors for the bencode codec.
//!
//! Every decode failure carries the byte offset at which it was detected so
//! a malformed document can be reported precisely without interpolating
//! context into the error message itself.

use thiserror::Error;

/// Result alias for codec operations.
pub type BencodeResult<T> = Result<T, BencodeError>;

/// Errors produced while decoding a bencoded document.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BencodeError {
    /// Input ended before the current token was complete.
    #[error("bencode input truncated")]
    Truncated {
        /// Byte offset where more input was expected.
        offset: usize,
    },
    /// An integer token held an empty, non-numeric, or overflowing payload.
    #[error("bencode invalid integer")]
    InvalidInteger {
        /// Byte offset of the offending token.
        offset: usize,
    },
    /// A string length prefix was empty, non-numeric, or overflowing.
    #[error("bencode invalid length prefix")]
    InvalidLength {
        /// Byte offset of the offending prefix.
        offset: usize,
    },
    /// A byte that cannot start any token was encountered.
    #[error("bencode unexpected byte")]
    UnexpectedByte {
        /// Byte offset of the unexpected byte.
        offset: usize,
        /// The byte that was read.
        byte: u8,
    },
    /// A list or dictionary ran out of input before its terminator.
    #[error("bencode unterminated container")]
    UnterminatedContainer {
        /// Byte offset where the container began.
        offset: usize,
    },
    /// A dictionary key was not a byte string.
    #[error("bencode dictionary key is not a string")]
    InvalidKey {
        /// Byte offset of the offending key token.
        offset: usize,
    },
    /// Bytes remained after the top-level value was decoded.
    #[error("bencode trailing data")]
    TrailingData {
        /// Byte offset of the first trailing byte.
        offset: usize,
    },
}
