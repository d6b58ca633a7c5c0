//! Record schema mapping from source to target client.

use rehome_config::ReplacementRule;
use rehome_model::ResumeRecord;

use crate::labels;
use crate::rewrite;

/// Content layout the target client is told to use for every migrated
/// item, regardless of whether the payload is single- or multi-file.
const CONTENT_LAYOUT: &str = "Original";
/// Ratio-limit sentinel meaning "use the global setting".
const RATIO_LIMIT_DEFAULT: i64 = -2000;
/// Seed status for an adopted item.
const SEED_STATUS_DEFAULT: i64 = 1;
/// Seeding-time-limit sentinel meaning "use the global setting".
const SEEDING_TIME_LIMIT_DEFAULT: i64 = -2;
/// Queue position for every migrated item; the target client renumbers
/// on first start.
const QUEUE_POSITION_DEFAULT: i64 = 1;

/// Rewrite a record, in place, into the target client's schema.
///
/// Applies fixed target defaults, rewrites the save path and any absolute
/// path-remapping entries through `rules`, mirrors the rewritten save path
/// into the target-client field, and reconciles the label into the tag
/// list. Re-applying the mapping to its own output yields an equal record.
///
/// The mapping does not depend on payload shape; the content layout is
/// pinned to [`CONTENT_LAYOUT`] for single- and multi-file items alike.
/// Returns the label that became a tag, if any.
pub fn translate_record(
    record: &mut ResumeRecord,
    rules: &[ReplacementRule],
    label: Option<&str>,
    tags_enabled: bool,
) -> Option<String> {
    record.qbt_content_layout = CONTENT_LAYOUT.to_owned();
    record.qbt_ratio_limit = RATIO_LIMIT_DEFAULT;
    record.qbt_seed_status = SEED_STATUS_DEFAULT;
    record.qbt_seeding_time_limit = SEEDING_TIME_LIMIT_DEFAULT;
    record.qbt_name = String::new();
    record.qbt_category = String::new();
    record.qbt_queue_position = QUEUE_POSITION_DEFAULT;
    record.qbt_temp_path_disabled = 0;

    record.save_path = rewrite::rewrite(&record.save_path, rules);
    for entry in &mut record.mapped_files {
        if rewrite::is_absolute(entry) {
            *entry = rewrite::rewrite(entry, rules);
        }
    }
    record.qbt_save_path.clone_from(&record.save_path);

    labels::reconcile(record, label, tags_enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<ReplacementRule> {
        vec![ReplacementRule {
            from: "/mnt/old".to_owned(),
            to: "/srv/new".to_owned(),
        }]
    }

    #[test]
    fn applies_target_defaults_and_rewrites_paths() {
        let mut record = ResumeRecord {
            save_path: "/mnt/old/films".to_owned(),
            mapped_files: vec![
                "/mnt/old/films/a.mkv".to_owned(),
                "relative/b.mkv".to_owned(),
            ],
            qbt_ratio_limit: 7,
            qbt_queue_position: 42,
            ..ResumeRecord::default()
        };
        let applied = translate_record(&mut record, &rules(), Some("films"), true);

        assert_eq!(record.qbt_content_layout, "Original");
        assert_eq!(record.qbt_ratio_limit, -2000);
        assert_eq!(record.qbt_seed_status, 1);
        assert_eq!(record.qbt_seeding_time_limit, -2);
        assert_eq!(record.qbt_queue_position, 1);
        assert_eq!(record.qbt_temp_path_disabled, 0);
        assert_eq!(record.qbt_name, "");
        assert_eq!(record.qbt_category, "");

        assert_eq!(record.save_path, "/srv/new/films");
        assert_eq!(record.qbt_save_path, "/srv/new/films");
        assert_eq!(record.mapped_files[0], "/srv/new/films/a.mkv");
        assert_eq!(record.mapped_files[1], "relative/b.mkv");

        assert_eq!(applied.as_deref(), Some("films"));
        assert_eq!(record.qbt_tags, vec!["films".to_owned()]);
    }

    #[test]
    fn mapping_is_idempotent() {
        let mut record = ResumeRecord {
            save_path: "/mnt/old/films".to_owned(),
            mapped_files: vec!["/mnt/old/films/a.mkv".to_owned()],
            ..ResumeRecord::default()
        };
        translate_record(&mut record, &rules(), Some("films"), true);
        let once = record.clone();
        translate_record(&mut record, &rules(), Some("films"), true);
        assert_eq!(record, once);
    }

    #[test]
    fn disabled_tags_leave_no_tag_list() {
        let mut record = ResumeRecord::default();
        let applied = translate_record(&mut record, &[], Some("films"), false);
        assert!(applied.is_none());
        assert!(record.qbt_tags.is_empty());
    }
}
