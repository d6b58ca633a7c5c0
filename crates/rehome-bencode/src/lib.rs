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

//! Self-describing recursive bencode codec.
//!
//! The format is byte oriented: strings are `<length>:<bytes>`, integers
//! are `i<digits>e`, lists are `l<item>*e`, and dictionaries are
//! `d<key><value>*e` with keys emitted in sorted byte order. String
//! payloads may carry arbitrary binary data (piece bitmaps), so the codec
//! never assumes UTF-8. Decoding produces a generic [`Value`] tree; typed
//! schemas are mapped on top of the tree by consumers.

mod decode;
mod encode;
mod error;
mod value;

pub use error::{BencodeError, BencodeResult};
pub use value::Value;
