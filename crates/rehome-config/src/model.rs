//! Typed run configuration and replacement-rule parsing.

use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

/// Name of the subdirectory holding per-item session state.
const STATE_DIR: &str = "state";
/// Name of the container file inside the state directory.
const CONTAINER_FILE: &str = "torrents.fastresume";
/// Name of the source client's label store file.
const LABEL_FILE: &str = "label.conf";

/// One ordered literal path substitution.
///
/// Rules apply in the order the caller supplies them, each against the
/// output of the previous one. Matching is literal and case-sensitive
/// with no path normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    /// Literal substring to search for.
    pub from: String,
    /// Replacement text.
    pub to: String,
}

impl ReplacementRule {
    /// Parse a single `from,to` entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] unless the entry splits on
    /// commas into exactly two components.
    pub fn parse(entry: &str) -> ConfigResult<Self> {
        let mut parts = entry.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(from), Some(to), None) => Ok(Self {
                from: from.to_owned(),
                to: to.to_owned(),
            }),
            _ => Err(ConfigError::InvalidRule {
                entry: entry.to_owned(),
            }),
        }
    }

    /// Parse a `;`-separated list of `from,to` entries.
    ///
    /// Empty input yields no rules. Rule order follows entry order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for the first malformed entry.
    pub fn parse_list(entries: &str) -> ConfigResult<Vec<Self>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        entries.split(';').map(Self::parse).collect()
    }
}

/// Everything one migration run needs to know before scheduling.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Source client configuration directory.
    pub source_dir: PathBuf,
    /// Target client session-state directory.
    pub dest_dir: PathBuf,
    /// Ordered save-path replacement rules.
    pub rules: Vec<ReplacementRule>,
    /// Whether resolved labels become target-client tags.
    pub tags_enabled: bool,
    /// Override for the scheduler admission bound, when given.
    pub admission_limit: Option<usize>,
}

impl MigrationConfig {
    /// Directory holding per-item state and companion descriptors.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.source_dir.join(STATE_DIR)
    }

    /// Path of the container file holding every embedded record.
    #[must_use]
    pub fn container_path(&self) -> PathBuf {
        self.state_dir().join(CONTAINER_FILE)
    }

    /// Path of the source client's label store.
    #[must_use]
    pub fn label_path(&self) -> PathBuf {
        self.source_dir.join(LABEL_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_rule() -> anyhow::Result<()> {
        let rule = ReplacementRule::parse("/mnt/old,/mnt/new")?;
        assert_eq!(rule.from, "/mnt/old");
        assert_eq!(rule.to, "/mnt/new");
        Ok(())
    }

    #[test]
    fn parses_rule_list_in_order() -> anyhow::Result<()> {
        let rules = ReplacementRule::parse_list("/a,/b;/c,/d")?;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].from, "/a");
        assert_eq!(rules[1].to, "/d");
        assert!(ReplacementRule::parse_list("")?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_malformed_rules() {
        for entry in ["/only-one", "/a,/b,/c", ""] {
            assert!(matches!(
                ReplacementRule::parse(entry),
                Err(ConfigError::InvalidRule { .. })
            ));
        }
    }

    #[test]
    fn empty_components_are_still_a_pair() -> anyhow::Result<()> {
        let rule = ReplacementRule::parse(",/new")?;
        assert_eq!(rule.from, "");
        assert_eq!(rule.to, "/new");
        Ok(())
    }

    #[test]
    fn derives_layout_paths() {
        let config = MigrationConfig {
            source_dir: PathBuf::from("/home/u/.config/deluge"),
            dest_dir: PathBuf::from("/home/u/BT_backup"),
            rules: Vec::new(),
            tags_enabled: true,
            admission_limit: None,
        };
        assert_eq!(
            config.container_path(),
            PathBuf::from("/home/u/.config/deluge/state/torrents.fastresume")
        );
        assert_eq!(
            config.label_path(),
            PathBuf::from("/home/u/.config/deluge/label.conf")
        );
    }
}
