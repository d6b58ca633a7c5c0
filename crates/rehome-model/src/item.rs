//! Stable per-item identifier.

use std::fmt;

use crate::error::{ModelError, ModelResult};

/// Number of hexadecimal characters in a content hash identifier.
const ITEM_ID_LEN: usize = 40;

/// Content-hash identifier for one managed item.
///
/// The same value serves as the key in the source container, the stem of
/// the companion content-descriptor filename, and the stem of both output
/// files, so it is validated once on construction and then passed around
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidItemId`] unless the input is exactly
    /// forty hexadecimal characters.
    pub fn new(value: impl Into<String>) -> ModelResult<Self> {
        let value = value.into();
        if value.len() == ITEM_ID_LEN && value.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidItemId { value })
        }
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
