//! Typed fast-resume record and its bencode schema mapping.

use std::collections::BTreeMap;

use rehome_bencode::Value;

use crate::error::{ModelError, ModelResult};

/// Persisted session state for one managed item, in the target client's
/// schema.
///
/// Source-format tags mirror the libtorrent resume dictionary; the
/// `qbt_*` fields carry the target client's own `qBt-` prefixed keys and
/// are always rewritten by the schema mapper, never merged from the
/// source. Fields absent from a decoded document keep their defaults;
/// unknown fields are dropped by this typed path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeRecord {
    /// Seconds the item has been active (`active_time`).
    pub active_time: i64,
    /// Epoch seconds when the item was added (`added_time`).
    pub added_time: i64,
    /// Whether DHT announces are enabled (`announce_to_dht`).
    pub announce_to_dht: i64,
    /// Whether local-service announces are enabled (`announce_to_lsd`).
    pub announce_to_lsd: i64,
    /// Whether tracker announces are enabled (`announce_to_trackers`).
    pub announce_to_trackers: i64,
    /// Whether the queue manages this item automatically (`auto_managed`).
    pub auto_managed: i64,
    /// Packed IPv4 banned-peer endpoints (`banned_peers`).
    pub banned_peers: Vec<u8>,
    /// Packed IPv6 banned-peer endpoints (`banned_peers6`).
    pub banned_peers6: Vec<u8>,
    /// Blocks per piece (`blocks per piece`).
    pub blocks_per_piece: i64,
    /// Epoch seconds when the download completed (`completed_time`).
    pub completed_time: i64,
    /// Per-item download rate cap in bytes/s (`download_rate_limit`).
    pub download_rate_limit: i64,
    /// Per-file `[size, mtime]` pairs (`file sizes`).
    pub file_sizes: Vec<Vec<i64>>,
    /// Resume file format marker (`file-format`).
    pub file_format: String,
    /// Resume file format version (`file-version`).
    pub file_version: i64,
    /// Per-file download priorities (`file_priority`).
    pub file_priority: Vec<i64>,
    /// Epoch seconds when seeding finished (`finished_time`).
    pub finished_time: i64,
    /// Raw twenty-byte content hash (`info-hash`).
    pub info_hash: Vec<u8>,
    /// Epoch seconds a complete copy was last seen (`last_seen_complete`).
    pub last_seen_complete: i64,
    /// Engine version that wrote the record (`libtorrent-version`).
    pub libtorrent_version: String,
    /// Per-item peer connection cap (`max_connections`).
    pub max_connections: i64,
    /// Per-item upload slot cap (`max_uploads`).
    pub max_uploads: i64,
    /// Times the payload was reported downloaded (`num_downloaded`).
    pub num_downloaded: i64,
    /// Peers without a complete copy at last scrape (`num_incomplete`).
    pub num_incomplete: i64,
    /// Per-file path remapping list (`mapped_files`); omitted when empty.
    pub mapped_files: Vec<String>,
    /// Whether the item is paused (`paused`).
    pub paused: i64,
    /// Packed IPv4 peer endpoints (`peers`).
    pub peers: Vec<u8>,
    /// Packed IPv6 peer endpoints (`peers6`).
    pub peers6: Vec<u8>,
    /// Packed per-piece have-bitmap (`pieces`); raw binary, not text.
    pub pieces: Vec<u8>,
    /// Target-client category (`qBt-category`); omitted when empty.
    pub qbt_category: String,
    /// Target-client content layout constant (`qBt-contentLayout`).
    pub qbt_content_layout: String,
    /// Target-client display-name override (`qBt-name`).
    pub qbt_name: String,
    /// Target-client queue position (`qBt-queuePosition`).
    pub qbt_queue_position: i64,
    /// Target-client share ratio limit (`qBt-ratioLimit`).
    pub qbt_ratio_limit: i64,
    /// Target-client save path (`qBt-savePath`).
    pub qbt_save_path: String,
    /// Target-client seed status (`qBt-seedStatus`).
    pub qbt_seed_status: i64,
    /// Target-client seeding time limit (`qBt-seedingTimeLimit`).
    pub qbt_seeding_time_limit: i64,
    /// Target-client tag list (`qBt-tags`).
    pub qbt_tags: Vec<String>,
    /// Target-client temp-path-disabled flag (`qBt-tempPathDisabled`).
    pub qbt_temp_path_disabled: i64,
    /// Save path in the source client's schema (`save_path`).
    pub save_path: String,
    /// Whether the item was added in seed mode (`seed_mode`).
    pub seed_mode: i64,
    /// Seconds spent seeding (`seeding_time`).
    pub seeding_time: i64,
    /// Whether sequential download is enabled (`sequential_download`).
    pub sequential_download: i64,
    /// Whether super-seeding is enabled (`super_seeding`).
    pub super_seeding: i64,
    /// Total bytes downloaded (`total_downloaded`).
    pub total_downloaded: i64,
    /// Total bytes uploaded (`total_uploaded`).
    pub total_uploaded: i64,
    /// Tracker URLs grouped into tiers (`trackers`).
    pub trackers: Vec<Vec<String>>,
    /// Per-item upload rate cap in bytes/s (`upload_rate_limit`).
    pub upload_rate_limit: i64,
    /// Opaque partial-piece state (`unfinished`); omitted when absent.
    pub unfinished: Option<Value>,
}

impl ResumeRecord {
    /// Decode a bencoded resume document into the typed schema.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Decode`] for malformed bencode and
    /// [`ModelError::FieldType`] when a recognized field holds a value of
    /// the wrong shape.
    pub fn decode(input: &[u8]) -> ModelResult<Self> {
        let tree = Value::decode(input)?;
        Self::from_value(&tree)
    }

    /// Map a decoded value tree into the typed schema.
    ///
    /// Fields absent from the tree keep their defaults; unknown keys are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotADictionary`] unless the tree's root is a
    /// dictionary, or [`ModelError::FieldType`] for ill-typed fields.
    pub fn from_value(tree: &Value) -> ModelResult<Self> {
        let dict = tree.as_dict().ok_or(ModelError::NotADictionary)?;
        Ok(Self {
            active_time: int(dict, "active_time")?,
            added_time: int(dict, "added_time")?,
            announce_to_dht: int(dict, "announce_to_dht")?,
            announce_to_lsd: int(dict, "announce_to_lsd")?,
            announce_to_trackers: int(dict, "announce_to_trackers")?,
            auto_managed: int(dict, "auto_managed")?,
            banned_peers: blob(dict, "banned_peers")?,
            banned_peers6: blob(dict, "banned_peers6")?,
            blocks_per_piece: int(dict, "blocks per piece")?,
            completed_time: int(dict, "completed_time")?,
            download_rate_limit: int(dict, "download_rate_limit")?,
            file_sizes: int_matrix(dict, "file sizes")?,
            file_format: text(dict, "file-format")?,
            file_version: int(dict, "file-version")?,
            file_priority: int_list(dict, "file_priority")?,
            finished_time: int(dict, "finished_time")?,
            info_hash: blob(dict, "info-hash")?,
            last_seen_complete: int(dict, "last_seen_complete")?,
            libtorrent_version: text(dict, "libtorrent-version")?,
            max_connections: int(dict, "max_connections")?,
            max_uploads: int(dict, "max_uploads")?,
            num_downloaded: int(dict, "num_downloaded")?,
            num_incomplete: int(dict, "num_incomplete")?,
            mapped_files: text_list(dict, "mapped_files")?,
            paused: int(dict, "paused")?,
            peers: blob(dict, "peers")?,
            peers6: blob(dict, "peers6")?,
            pieces: blob(dict, "pieces")?,
            qbt_category: text(dict, "qBt-category")?,
            qbt_content_layout: text(dict, "qBt-contentLayout")?,
            qbt_name: text(dict, "qBt-name")?,
            qbt_queue_position: int(dict, "qBt-queuePosition")?,
            qbt_ratio_limit: int(dict, "qBt-ratioLimit")?,
            qbt_save_path: text(dict, "qBt-savePath")?,
            qbt_seed_status: int(dict, "qBt-seedStatus")?,
            qbt_seeding_time_limit: int(dict, "qBt-seedingTimeLimit")?,
            qbt_tags: text_list(dict, "qBt-tags")?,
            qbt_temp_path_disabled: int(dict, "qBt-tempPathDisabled")?,
            save_path: text(dict, "save_path")?,
            seed_mode: int(dict, "seed_mode")?,
            seeding_time: int(dict, "seeding_time")?,
            sequential_download: int(dict, "sequential_download")?,
            super_seeding: int(dict, "super_seeding")?,
            total_downloaded: int(dict, "total_downloaded")?,
            total_uploaded: int(dict, "total_uploaded")?,
            trackers: tracker_tiers(dict, "trackers")?,
            upload_rate_limit: int(dict, "upload_rate_limit")?,
            unfinished: dict.get(b"unfinished".as_slice()).cloned(),
        })
    }

    /// Build the generic value tree for this record.
    ///
    /// `mapped_files`, `qBt-category`, and `unfinished` are omitted when
    /// empty; every other field is always present, matching the source
    /// client's writer.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut entries = BTreeMap::new();
        put_int(&mut entries, "active_time", self.active_time);
        put_int(&mut entries, "added_time", self.added_time);
        put_int(&mut entries, "announce_to_dht", self.announce_to_dht);
        put_int(&mut entries, "announce_to_lsd", self.announce_to_lsd);
        put_int(&mut entries, "announce_to_trackers", self.announce_to_trackers);
        put_int(&mut entries, "auto_managed", self.auto_managed);
        put_blob(&mut entries, "banned_peers", &self.banned_peers);
        put_blob(&mut entries, "banned_peers6", &self.banned_peers6);
        put_int(&mut entries, "blocks per piece", self.blocks_per_piece);
        put_int(&mut entries, "completed_time", self.completed_time);
        put_int(&mut entries, "download_rate_limit", self.download_rate_limit);
        put(
            &mut entries,
            "file sizes",
            Value::List(
                self.file_sizes
                    .iter()
                    .map(|pair| Value::List(pair.iter().map(|v| Value::Integer(*v)).collect()))
                    .collect(),
            ),
        );
        put_text(&mut entries, "file-format", &self.file_format);
        put_int(&mut entries, "file-version", self.file_version);
        put(
            &mut entries,
            "file_priority",
            Value::List(self.file_priority.iter().map(|v| Value::Integer(*v)).collect()),
        );
        put_int(&mut entries, "finished_time", self.finished_time);
        put_blob(&mut entries, "info-hash", &self.info_hash);
        put_int(&mut entries, "last_seen_complete", self.last_seen_complete);
        put_text(&mut entries, "libtorrent-version", &self.libtorrent_version);
        put_int(&mut entries, "max_connections", self.max_connections);
        put_int(&mut entries, "max_uploads", self.max_uploads);
        put_int(&mut entries, "num_downloaded", self.num_downloaded);
        put_int(&mut entries, "num_incomplete", self.num_incomplete);
        if !self.mapped_files.is_empty() {
            put(
                &mut entries,
                "mapped_files",
                Value::List(self.mapped_files.iter().map(|v| Value::from(v.as_str())).collect()),
            );
        }
        put_int(&mut entries, "paused", self.paused);
        put_blob(&mut entries, "peers", &self.peers);
        put_blob(&mut entries, "peers6", &self.peers6);
        put_blob(&mut entries, "pieces", &self.pieces);
        if !self.qbt_category.is_empty() {
            put_text(&mut entries, "qBt-category", &self.qbt_category);
        }
        put_text(&mut entries, "qBt-contentLayout", &self.qbt_content_layout);
        put_text(&mut entries, "qBt-name", &self.qbt_name);
        put_int(&mut entries, "qBt-queuePosition", self.qbt_queue_position);
        put_int(&mut entries, "qBt-ratioLimit", self.qbt_ratio_limit);
        put_text(&mut entries, "qBt-savePath", &self.qbt_save_path);
        put_int(&mut entries, "qBt-seedStatus", self.qbt_seed_status);
        put_int(&mut entries, "qBt-seedingTimeLimit", self.qbt_seeding_time_limit);
        put(
            &mut entries,
            "qBt-tags",
            Value::List(self.qbt_tags.iter().map(|v| Value::from(v.as_str())).collect()),
        );
        put_int(&mut entries, "qBt-tempPathDisabled", self.qbt_temp_path_disabled);
        put_text(&mut entries, "save_path", &self.save_path);
        put_int(&mut entries, "seed_mode", self.seed_mode);
        put_int(&mut entries, "seeding_time", self.seeding_time);
        put_int(&mut entries, "sequential_download", self.sequential_download);
        put_int(&mut entries, "super_seeding", self.super_seeding);
        put_int(&mut entries, "total_downloaded", self.total_downloaded);
        put_int(&mut entries, "total_uploaded", self.total_uploaded);
        put(
            &mut entries,
            "trackers",
            Value::List(
                self.trackers
                    .iter()
                    .map(|tier| {
                        Value::List(tier.iter().map(|url| Value::from(url.as_str())).collect())
                    })
                    .collect(),
            ),
        );
        put_int(&mut entries, "upload_rate_limit", self.upload_rate_limit);
        if let Some(unfinished) = &self.unfinished {
            put(&mut entries, "unfinished", unfinished.clone());
        }
        Value::Dict(entries)
    }

    /// Encode the record with sorted dictionary keys.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.to_value().encode()
    }
}

fn put(entries: &mut BTreeMap<Vec<u8>, Value>, key: &str, value: Value) {
    entries.insert(key.as_bytes().to_vec(), value);
}

fn put_int(entries: &mut BTreeMap<Vec<u8>, Value>, key: &str, value: i64) {
    put(entries, key, Value::Integer(value));
}

fn put_text(entries: &mut BTreeMap<Vec<u8>, Value>, key: &str, value: &str) {
    put(entries, key, Value::from(value));
}

fn put_blob(entries: &mut BTreeMap<Vec<u8>, Value>, key: &str, value: &[u8]) {
    put(entries, key, Value::Bytes(value.to_vec()));
}

fn int(dict: &BTreeMap<Vec<u8>, Value>, field: &'static str) -> ModelResult<i64> {
    match dict.get(field.as_bytes()) {
        None => Ok(0),
        Some(value) => value.as_int().ok_or(ModelError::FieldType { field }),
    }
}

fn blob(dict: &BTreeMap<Vec<u8>, Value>, field: &'static str) -> ModelResult<Vec<u8>> {
    match dict.get(field.as_bytes()) {
        None => Ok(Vec::new()),
        Some(value) => value
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or(ModelError::FieldType { field }),
    }
}

fn text(dict: &BTreeMap<Vec<u8>, Value>, field: &'static str) -> ModelResult<String> {
    match dict.get(field.as_bytes()) {
        None => Ok(String::new()),
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .ok_or(ModelError::FieldType { field }),
    }
}

fn int_list(dict: &BTreeMap<Vec<u8>, Value>, field: &'static str) -> ModelResult<Vec<i64>> {
    list_of(dict, field, |item| item.as_int())
}

fn text_list(dict: &BTreeMap<Vec<u8>, Value>, field: &'static str) -> ModelResult<Vec<String>> {
    list_of(dict, field, |item| item.as_str().map(str::to_owned))
}

fn int_matrix(dict: &BTreeMap<Vec<u8>, Value>, field: &'static str) -> ModelResult<Vec<Vec<i64>>> {
    list_of(dict, field, |row| {
        row.as_list()
            .map(|items| items.iter().map(Value::as_int).collect::<Option<Vec<i64>>>())?
    })
}

fn tracker_tiers(
    dict: &BTreeMap<Vec<u8>, Value>,
    field: &'static str,
) -> ModelResult<Vec<Vec<String>>> {
    list_of(dict, field, |tier| {
        tier.as_list().map(|urls| {
            urls.iter()
                .map(|url| url.as_str().map(str::to_owned))
                .collect::<Option<Vec<String>>>()
        })?
    })
}

fn list_of<T>(
    dict: &BTreeMap<Vec<u8>, Value>,
    field: &'static str,
    mut convert: impl FnMut(&Value) -> Option<T>,
) -> ModelResult<Vec<T>> {
    match dict.get(field.as_bytes()) {
        None => Ok(Vec::new()),
        Some(value) => value
            .as_list()
            .ok_or(ModelError::FieldType { field })?
            .iter()
            .map(|item| convert(item).ok_or(ModelError::FieldType { field }))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            active_time: 7_200,
            added_time: 1_500_000_000,
            announce_to_dht: 1,
            announce_to_lsd: 1,
            announce_to_trackers: 1,
            auto_managed: 1,
            blocks_per_piece: 16,
            completed_time: 1_500_100_000,
            file_sizes: vec![vec![1_048_576, 1_500_099_000], vec![2_048, 1_500_099_100]],
            file_format: "libtorrent resume file".to_owned(),
            file_version: 1,
            file_priority: vec![1, 1],
            finished_time: 3_600,
            info_hash: vec![0xab; 20],
            libtorrent_version: "1.1.5.0".to_owned(),
            max_connections: 100,
            max_uploads: -1,
            mapped_files: vec!["relative/name.mkv".to_owned(), "/abs/name.mkv".to_owned()],
            paused: 0,
            pieces: vec![0x01, 0x00, 0xff],
            qbt_category: "films".to_owned(),
            qbt_content_layout: "Original".to_owned(),
            qbt_queue_position: 1,
            qbt_ratio_limit: -2000,
            qbt_save_path: "/data/films".to_owned(),
            qbt_seed_status: 1,
            qbt_seeding_time_limit: -2,
            qbt_tags: vec!["films".to_owned()],
            save_path: "/data/films".to_owned(),
            seeding_time: 3_000,
            total_downloaded: 1_050_624,
            total_uploaded: 2_101_248,
            trackers: vec![vec!["udp://tracker.example:6969/announce".to_owned()]],
            unfinished: None,
            ..ResumeRecord::default()
        }
    }

    #[test]
    fn typed_round_trip_reproduces_bytes() -> anyhow::Result<()> {
        let record = sample_record();
        let encoded = record.encode();
        let decoded = ResumeRecord::decode(&encoded)?;
        assert_eq!(decoded, record);
        assert_eq!(decoded.encode(), encoded);
        Ok(())
    }

    #[test]
    fn encode_uses_source_format_tags() {
        let encoded = sample_record().encode();
        let text = encoded
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { '.' })
            .collect::<String>();
        assert!(text.contains("10:file sizes"));
        assert!(text.contains("13:file_priority"));
        assert!(text.contains("12:qBt-savePath"));
        assert!(text.contains("17:qBt-contentLayout8:Original"));
        assert!(text.starts_with("d11:active_timei7200e"));
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let record = ResumeRecord::default();
        let tree = record.to_value();
        assert!(tree.get("mapped_files").is_none());
        assert!(tree.get("qBt-category").is_none());
        assert!(tree.get("unfinished").is_none());
        assert!(tree.get("qBt-tags").is_some());
        assert!(tree.get("qBt-name").is_some());
    }

    #[test]
    fn absent_fields_keep_defaults() -> anyhow::Result<()> {
        let record = ResumeRecord::decode(b"d9:save_path5:/datae")?;
        assert_eq!(record.save_path, "/data");
        assert_eq!(record.paused, 0);
        assert!(record.trackers.is_empty());
        assert!(record.unfinished.is_none());
        Ok(())
    }

    #[test]
    fn unknown_fields_are_dropped() -> anyhow::Result<()> {
        let record = ResumeRecord::decode(b"d12:novel-field!i1e9:save_path5:/datae")?;
        assert_eq!(record.save_path, "/data");
        let reencoded = record.to_value();
        assert!(reencoded.get("novel-field!").is_none());
        Ok(())
    }

    #[test]
    fn ill_typed_fields_are_rejected() {
        let err = ResumeRecord::decode(b"d9:save_pathi1ee").unwrap_err();
        assert!(matches!(
            err,
            ModelError::FieldType { field: "save_path" }
        ));
        let err = ResumeRecord::decode(b"l4:spame").unwrap_err();
        assert!(matches!(err, ModelError::NotADictionary));
    }

    #[test]
    fn unfinished_state_is_preserved_opaquely() -> anyhow::Result<()> {
        let mut record = sample_record();
        record.unfinished = Some(Value::List(vec![Value::Integer(3)]));
        let decoded = ResumeRecord::decode(&record.encode())?;
        assert_eq!(decoded.unfinished, Some(Value::List(vec![Value::Integer(3)])));
        Ok(())
    }
}
