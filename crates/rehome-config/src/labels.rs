//! Adapter for the source client's on-disk label store.
//!
//! The store file holds two concatenated JSON-ish documents. Only the
//! second carries the item-to-label map, so the adapter skips everything
//! up to and including the first `}` byte and parses the remainder. A `}`
//! inside the leading document would break the skip; the source client
//! does not produce one in practice, and a misparse only disables labels.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

/// The trailing document's shape, reduced to the one map the migration reads.
#[derive(Debug, Deserialize)]
struct LabelDocument {
    #[serde(default)]
    torrent_labels: HashMap<String, String>,
}

/// Item-to-label assignments loaded from the source client.
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    labels: HashMap<String, String>,
}

impl LabelStore {
    /// A store with no assignments, used when labels are disabled.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the raw store file bytes.
    ///
    /// Returns `None` when the trailing document cannot be parsed, which
    /// callers treat as "run without labels" rather than a fatal error.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let brace = bytes.iter().position(|byte| *byte == b'}')?;
        let trailing = &bytes[brace + 1..];
        match serde_json::from_slice::<LabelDocument>(trailing) {
            Ok(document) => Some(Self {
                labels: document.torrent_labels,
            }),
            Err(error) => {
                warn!(%error, "label store misparse, continuing without labels");
                None
            }
        }
    }

    /// Label assigned to one item, if any.
    #[must_use]
    pub fn label_for(&self, item_id: &str) -> Option<&str> {
        self.labels.get(item_id).map(String::as_str)
    }

    /// Number of assignments in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the store carries no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE: &[u8] = br#"{"file": 1, "format": 1}{
        "torrent_labels": {
            "0123456789abcdef0123456789abcdef01234567": "linux-isos",
            "89abcdef0123456789abcdef0123456789abcdef": ""
        },
        "prefs": {}
    }"#;

    #[test]
    fn reads_trailing_document() {
        let store = LabelStore::parse(STORE).expect("store should parse");
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.label_for("0123456789abcdef0123456789abcdef01234567"),
            Some("linux-isos")
        );
        assert_eq!(
            store.label_for("89abcdef0123456789abcdef0123456789abcdef"),
            Some("")
        );
        assert_eq!(store.label_for("unknown"), None);
    }

    #[test]
    fn missing_map_yields_empty_store() {
        let store = LabelStore::parse(br#"{"file": 1}{"prefs": {}}"#).expect("store should parse");
        assert!(store.is_empty());
    }

    #[test]
    fn misparse_disables_labels() {
        assert!(LabelStore::parse(b"{\"file\": 1}not json").is_none());
        assert!(LabelStore::parse(b"no braces at all").is_none());
    }

    #[test]
    fn empty_store_answers_nothing() {
        assert!(LabelStore::empty().label_for("anything").is_none());
        assert!(LabelStore::empty().is_empty());
    }
}
