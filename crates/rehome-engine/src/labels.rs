//! Label-to-tag reconciliation.

use rehome_model::ResumeRecord;

/// Reconcile the source client's label into the record's tag list.
///
/// With tags disabled the tag list is cleared. With tags enabled and a
/// non-empty label assigned, the tag list becomes exactly that one label,
/// stored verbatim; any previous tag content is discarded. In every other
/// case the tag list ends up empty.
///
/// Returns the label that was applied, if any, so callers can aggregate
/// the distinct set for an external tag registry.
pub fn reconcile(
    record: &mut ResumeRecord,
    label: Option<&str>,
    tags_enabled: bool,
) -> Option<String> {
    record.qbt_tags.clear();
    if !tags_enabled {
        return None;
    }
    match label {
        Some(label) if !label.is_empty() => {
            record.qbt_tags.push(label.to_owned());
            Some(label.to_owned())
        }
        _ => None,
    }
}

/// Escape code points above 127 as `\x` followed by lowercase hex.
///
/// This is the form an external tag registry stores; the record itself
/// keeps the raw label.
#[must_use]
pub fn escape_non_ascii(label: &str) -> String {
    use std::fmt::Write;

    let mut escaped = String::with_capacity(label.len());
    for ch in label.chars() {
        let code = u32::from(ch);
        if code > 127 {
            let _ = write!(escaped, "\\x{code:x}");
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_exactly_one_tag() {
        let mut record = ResumeRecord {
            qbt_tags: vec!["stale".to_owned(), "tags".to_owned()],
            ..ResumeRecord::default()
        };
        let applied = reconcile(&mut record, Some("films"), true);
        assert_eq!(applied.as_deref(), Some("films"));
        assert_eq!(record.qbt_tags, vec!["films".to_owned()]);
    }

    #[test]
    fn clears_tags_when_disabled() {
        let mut record = ResumeRecord {
            qbt_tags: vec!["stale".to_owned()],
            ..ResumeRecord::default()
        };
        assert!(reconcile(&mut record, Some("films"), false).is_none());
        assert!(record.qbt_tags.is_empty());
    }

    #[test]
    fn empty_or_missing_label_yields_no_tags() {
        let mut record = ResumeRecord::default();
        assert!(reconcile(&mut record, Some(""), true).is_none());
        assert!(record.qbt_tags.is_empty());
        assert!(reconcile(&mut record, None, true).is_none());
        assert!(record.qbt_tags.is_empty());
    }

    #[test]
    fn escapes_code_points_above_ascii() {
        assert_eq!(escape_non_ascii("plain"), "plain");
        assert_eq!(escape_non_ascii("caf\u{e9}"), "caf\\xe9");
        assert_eq!(escape_non_ascii("\u{65e5}\u{672c}"), "\\x65e5\\x672c");
    }
}
