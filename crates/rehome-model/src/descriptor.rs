//! Read-only view of a companion content descriptor.

use rehome_bencode::Value;

use crate::error::{ModelError, ModelResult};

/// The parts of a content descriptor the migration needs.
///
/// A descriptor document is never rewritten. The sink byte-copies the
/// original file, so this type only surfaces the display name and whether
/// the payload is a multi-file layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    /// Payload name as stored in the metadata dictionary.
    pub name: String,
    /// UTF-8 name variant, when the document carries one.
    pub name_utf8: Option<String>,
    /// Whether the metadata dictionary declares a `files` list.
    pub multi_file: bool,
}

impl ContentDescriptor {
    /// Decode a descriptor document from its serialized bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Decode`] when the bytes are not a valid
    /// document, and the same mapping errors as [`Self::from_value`]
    /// afterwards.
    pub fn decode(bytes: &[u8]) -> ModelResult<Self> {
        let value = Value::decode(bytes)?;
        Self::from_value(&value)
    }

    /// Map a decoded tree into a descriptor view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotADictionary`] when the root is not a
    /// dictionary, [`ModelError::MissingField`] when `info` or `info.name`
    /// is absent, and [`ModelError::FieldType`] when either holds a value
    /// of the wrong shape.
    pub fn from_value(value: &Value) -> ModelResult<Self> {
        let root = value.as_dict().ok_or(ModelError::NotADictionary)?;
        let info = root
            .get(b"info".as_slice())
            .ok_or(ModelError::MissingField { field: "info" })?
            .as_dict()
            .ok_or(ModelError::FieldType { field: "info" })?;
        let name = info
            .get(b"name".as_slice())
            .ok_or(ModelError::MissingField { field: "name" })?
            .as_str()
            .ok_or(ModelError::FieldType { field: "name" })?
            .to_owned();
        let name_utf8 = match info.get(b"name.utf-8".as_slice()) {
            Some(raw) => Some(
                raw.as_str()
                    .ok_or(ModelError::FieldType { field: "name.utf-8" })?
                    .to_owned(),
            ),
            None => None,
        };
        let multi_file = match info.get(b"files".as_slice()) {
            Some(raw) => {
                raw.as_list().ok_or(ModelError::FieldType { field: "files" })?;
                true
            }
            None => false,
        };
        Ok(Self {
            name,
            name_utf8,
            multi_file,
        })
    }

    /// Name to show in progress output, preferring the UTF-8 variant.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name_utf8.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_single_file_descriptor() -> anyhow::Result<()> {
        let bytes = b"d4:infod6:lengthi7e4:name8:blob.bin12:piece lengthi16384eee";
        let descriptor = ContentDescriptor::decode(bytes)?;
        assert_eq!(descriptor.name, "blob.bin");
        assert_eq!(descriptor.name_utf8, None);
        assert!(!descriptor.multi_file);
        assert_eq!(descriptor.display_name(), "blob.bin");
        Ok(())
    }

    #[test]
    fn reads_multi_file_descriptor_with_utf8_name() -> anyhow::Result<()> {
        let bytes =
            b"d4:infod5:filesld6:lengthi1e4:pathl1:aeee4:name3:dir10:name.utf-84:d\xc3\xafree";
        let descriptor = ContentDescriptor::decode(bytes)?;
        assert_eq!(descriptor.name, "dir");
        assert_eq!(descriptor.name_utf8.as_deref(), Some("d\u{ef}r"));
        assert!(descriptor.multi_file);
        assert_eq!(descriptor.display_name(), "d\u{ef}r");
        Ok(())
    }

    #[test]
    fn rejects_document_without_info() {
        assert!(matches!(
            ContentDescriptor::decode(b"d4:name4:baree"),
            Err(ModelError::MissingField { field: "info" })
        ));
    }

    #[test]
    fn rejects_ill_typed_name() {
        assert!(matches!(
            ContentDescriptor::decode(b"d4:infod4:namei3eee"),
            Err(ModelError::FieldType { field: "name" })
        ));
    }
}
