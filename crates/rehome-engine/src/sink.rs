//! Persistence of translated records and their companion descriptors.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use rehome_model::{ItemId, ResumeRecord};

use crate::error::{EngineError, EngineResult};

/// Write both output files for one item into `dest_dir`.
///
/// The translated record is encoded into `<id>.fastresume`, creating or
/// truncating the file. The descriptor is byte-copied to `<id>.torrent`
/// and flushed to disk before success is reported, so a crash cannot
/// leave the target client a record without its descriptor.
///
/// # Errors
///
/// Returns [`EngineError::Io`] naming the operation that failed.
pub fn persist(
    item_id: &ItemId,
    record: &ResumeRecord,
    descriptor_path: &Path,
    dest_dir: &Path,
) -> EngineResult<()> {
    let resume_path = dest_dir.join(format!("{item_id}.fastresume"));
    fs::write(&resume_path, record.encode())
        .map_err(|source| EngineError::io("write record", &resume_path, source))?;

    let copy_path = dest_dir.join(format!("{item_id}.torrent"));
    let payload = fs::read(descriptor_path)
        .map_err(|source| EngineError::io("read descriptor", descriptor_path, source))?;
    let mut copy = File::create(&copy_path)
        .map_err(|source| EngineError::io("create descriptor copy", &copy_path, source))?;
    copy.write_all(&payload)
        .map_err(|source| EngineError::io("write descriptor copy", &copy_path, source))?;
    copy.sync_all()
        .map_err(|source| EngineError::io("sync descriptor copy", &copy_path, source))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_id() -> ItemId {
        ItemId::new("0123456789abcdef0123456789abcdef01234567").expect("valid id")
    }

    #[test]
    fn writes_both_output_files() -> anyhow::Result<()> {
        let source = tempfile::tempdir()?;
        let dest = tempfile::tempdir()?;
        let descriptor_path = source.path().join("item.torrent");
        fs::write(&descriptor_path, b"d4:infod4:name1:aee")?;

        let record = ResumeRecord {
            save_path: "/srv/data".to_owned(),
            ..ResumeRecord::default()
        };
        persist(&item_id(), &record, &descriptor_path, dest.path())?;

        let resume = fs::read(dest.path().join(format!("{}.fastresume", item_id())))?;
        assert_eq!(resume, record.encode());
        let copied = fs::read(dest.path().join(format!("{}.torrent", item_id())))?;
        assert_eq!(copied, b"d4:infod4:name1:aee");
        Ok(())
    }

    #[test]
    fn truncates_existing_outputs() -> anyhow::Result<()> {
        let source = tempfile::tempdir()?;
        let dest = tempfile::tempdir()?;
        let descriptor_path = source.path().join("item.torrent");
        fs::write(&descriptor_path, b"fresh")?;
        fs::write(
            dest.path().join(format!("{}.fastresume", item_id())),
            b"stale bytes that are longer than the new payload",
        )?;
        fs::write(dest.path().join(format!("{}.torrent", item_id())), b"stale")?;

        persist(&item_id(), &ResumeRecord::default(), &descriptor_path, dest.path())?;

        let copied = fs::read(dest.path().join(format!("{}.torrent", item_id())))?;
        assert_eq!(copied, b"fresh");
        let resume = fs::read(dest.path().join(format!("{}.fastresume", item_id())))?;
        assert_eq!(resume, ResumeRecord::default().encode());
        Ok(())
    }

    #[test]
    fn reports_missing_descriptor_read() {
        let dest = tempfile::tempdir().expect("tempdir");
        let err = persist(
            &item_id(),
            &ResumeRecord::default(),
            Path::new("/nonexistent/item.torrent"),
            dest.path(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Io {
                operation: "read descriptor",
                ..
            }
        ));
    }
}
