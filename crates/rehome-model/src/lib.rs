//! Core migration domain types shared across the workspace.
//!
//! The central type is [`ResumeRecord`], the typed view of one managed
//! item's persisted session state. It decodes from the source client's
//! bencoded form through the generic [`rehome_bencode::Value`] tree and
//! encodes back with sorted dictionary keys, which the target client
//! requires. Unknown source fields are dropped by the typed path; lossless
//! round-tripping of unrecognized data is only available on the generic
//! tree itself.

mod descriptor;
mod error;
mod item;
mod resume;

pub use descriptor::ContentDescriptor;
pub use error::{ModelError, ModelResult};
pub use item::ItemId;
pub use resume::ResumeRecord;
