#![allow(clippy::redundant_pub_crate)]

//! Per-item translation pipeline.

use std::path::PathBuf;

use rehome_model::{ContentDescriptor, ItemId, ResumeRecord};
use tracing::debug;

use crate::EngineContext;
use crate::error::{EngineError, EngineResult};
use crate::mapper;
use crate::outcome::TranslationSuccess;
use crate::sink;

/// Translate one item end to end: decode the embedded record, load its
/// companion descriptor, map, persist.
///
/// # Errors
///
/// Any [`EngineError`] here fails this item only; siblings are unaffected.
pub(crate) fn translate_item(
    context: &EngineContext,
    item_id: &ItemId,
    embedded: &[u8],
) -> EngineResult<TranslationSuccess> {
    let mut record =
        ResumeRecord::decode(embedded).map_err(|source| EngineError::Record { source })?;

    let descriptor_path = descriptor_path(context, item_id);
    if !descriptor_path.is_file() {
        return Err(EngineError::MissingDescriptor {
            path: descriptor_path,
        });
    }
    let payload = std::fs::read(&descriptor_path)
        .map_err(|source| EngineError::io("read descriptor", &descriptor_path, source))?;
    let descriptor = ContentDescriptor::decode(&payload).map_err(|source| {
        EngineError::Descriptor {
            path: descriptor_path.clone(),
            source,
        }
    })?;

    let label = context
        .labels
        .label_for(item_id.as_str())
        .map(str::to_owned);
    let applied = mapper::translate_record(
        &mut record,
        &context.rules,
        label.as_deref(),
        context.tags_enabled,
    );

    sink::persist(item_id, &record, &descriptor_path, &context.dest_dir)?;
    debug!(item_id = %item_id, name = %descriptor.display_name(), "item translated");

    Ok(TranslationSuccess {
        item_id: item_id.clone(),
        message: format!("translated {}", descriptor.display_name()),
        name: descriptor.display_name().to_owned(),
        label: applied,
    })
}

fn descriptor_path(context: &EngineContext, item_id: &ItemId) -> PathBuf {
    context.state_dir.join(format!("{item_id}.torrent"))
}
