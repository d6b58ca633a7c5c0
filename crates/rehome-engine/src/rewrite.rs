//! Literal save-path rewriting.

use rehome_config::ReplacementRule;

/// Apply every rule in caller order, each against the previous output.
///
/// Matching is literal and case-sensitive with no path normalization, so
/// a rule can rewrite separators as well as directory names. An empty
/// rule list returns the input unchanged.
#[must_use]
pub fn rewrite(path: &str, rules: &[ReplacementRule]) -> String {
    rules.iter().fold(path.to_owned(), |current, rule| {
        current.replace(&rule.from, &rule.to)
    })
}

/// Whether a path string is absolute in any convention the source data
/// uses: unix-rooted, drive-letter, or UNC.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with(r"\\") {
        return true;
    }
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(drive), Some(':'), Some('/' | '\\')) if drive.is_ascii_alphabetic()
    )
}
