#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Bounded translation engine for fast-resume migration.
//!
//! Layout: `rewrite.rs` (literal save-path rewriting), `labels.rs`
//! (label-to-tag reconciliation), `mapper.rs` (source-to-target schema
//! mapping), `worker.rs` (per-item pipeline), `scheduler.rs` (bounded
//! fan-out and outcome streams), `sink.rs` (output persistence).

pub mod error;
pub mod labels;
pub mod mapper;
pub mod outcome;
pub mod rewrite;
mod scheduler;
pub mod sink;
mod worker;

pub use error::{EngineError, EngineResult};
pub use outcome::{TranslationFailure, TranslationSuccess};
pub use scheduler::{TranslationStreams, run};

use std::path::PathBuf;

use rehome_config::{LabelStore, ReplacementRule};

/// Shared read-only state for one migration run.
///
/// Built once before scheduling, wrapped in an `Arc`, and never mutated
/// while translation tasks are running.
#[derive(Debug)]
pub struct EngineContext {
    /// Directory holding per-item state and companion descriptors.
    pub state_dir: PathBuf,
    /// Directory the translated outputs are written into.
    pub dest_dir: PathBuf,
    /// Ordered save-path replacement rules.
    pub rules: Vec<ReplacementRule>,
    /// Item-to-label assignments from the source client.
    pub labels: LabelStore,
    /// Whether resolved labels become target-client tags.
    pub tags_enabled: bool,
    /// Admission bound override; defaults to twice the host parallelism.
    pub admission_limit: Option<usize>,
}
