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

//! Migration run configuration.
//!
//! Layout: `model.rs` (typed run configuration and rule parsing),
//! `defaults.rs` (per-platform conventional directories), `validate.rs`
//! (pre-flight layout checks), `labels.rs` (the source client's label
//! store adapter).

pub mod defaults;
pub mod error;
pub mod labels;
pub mod model;
pub mod validate;

pub use defaults::{Platform, PlatformDefaults};
pub use error::{ConfigError, ConfigResult};
pub use labels::LabelStore;
pub use model::{MigrationConfig, ReplacementRule};
pub use validate::validate_layout;
