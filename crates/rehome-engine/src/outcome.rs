//! Per-item translation outcomes.

use rehome_model::ItemId;

use crate::error::EngineError;

/// Report for one item that reached the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSuccess {
    /// Item the report is about.
    pub item_id: ItemId,
    /// Human-readable progress line.
    pub message: String,
    /// Display name taken from the content descriptor.
    pub name: String,
    /// Label applied as a tag, when one was.
    pub label: Option<String>,
}

/// Report for one item that failed without affecting its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailure {
    /// Item the report is about.
    pub item_id: ItemId,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl TranslationFailure {
    /// Render a pipeline error into the item's failure report.
    #[must_use]
    pub fn from_error(item_id: ItemId, error: &EngineError) -> Self {
        let message = match error {
            EngineError::Record { source } => {
                format!("can't decode embedded record: {source}")
            }
            EngineError::MissingDescriptor { path } => {
                format!("can't find content descriptor {}", path.display())
            }
            EngineError::Descriptor { path, source } => {
                format!("can't decode content descriptor {}: {source}", path.display())
            }
            EngineError::Io {
                operation,
                path,
                source,
            } => format!("{operation} failed for {}: {source}", path.display()),
        };
        Self { item_id, message }
    }
}
