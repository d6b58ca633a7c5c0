//! Generic bencode value tree.

use std::collections::BTreeMap;

use crate::decode;
use crate::encode;
use crate::error::BencodeResult;

/// A decoded bencode value.
///
/// Dictionaries use a [`BTreeMap`] keyed by raw bytes, so iteration (and
/// therefore encoding) is always in sorted byte order, which the target
/// client enforces when it reads resume data back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A length-prefixed byte string; not necessarily valid UTF-8.
    Bytes(Vec<u8>),
    /// A signed integer.
    Integer(i64),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte-string keys in sorted order.
    Dict(BTreeMap<Vec<u8>, Value>),
}

impl Value {
    /// Decode a complete bencoded document.
    ///
    /// The entire input must be consumed; trailing bytes are an error.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::BencodeError`] describing the malformed token and
    /// the byte offset at which decoding failed.
    pub fn decode(input: &[u8]) -> BencodeResult<Self> {
        decode::decode_document(input)
    }

    /// Encode this value, emitting dictionary keys in sorted byte order.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    /// Encode this value into an existing buffer.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        encode::encode_value(self, out);
    }

    /// Borrow the raw bytes of a string value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Borrow a string value as UTF-8 text, when it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// Read an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow a dictionary value.
    #[must_use]
    pub const fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, Self>> {
        match self {
            Self::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a dictionary entry by UTF-8 key.
    ///
    /// Returns `None` when the value is not a dictionary or the key is
    /// absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_dict().and_then(|entries| entries.get(key.as_bytes()))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Bytes(value.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<Vec<u8>, Value>> for Value {
    fn from(value: BTreeMap<Vec<u8>, Value>) -> Self {
        Self::Dict(value)
    }
}
