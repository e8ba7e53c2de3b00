//! Record codec for the Maven index chunk format.
//!
//! Translates typed [`Record`](mindex_record::Record)s to and from the flat,
//! string-keyed maps stored in index chunks. Key names, composite field
//! layouts and marker literals follow the chunk format byte for byte.
//!
//! # Architecture
//!
//! - [`compact`] / [`RecordCompactor`]: record to encoded map, one encoder per record type
//! - [`RecordExpander`]: encoded map back to a record, type inferred from marker keys
//! - [`fields`]: wire key names, the `|` separator and the composite helpers
//!
//! Both directions are pure: no I/O and no shared state, so they can run
//! concurrently over distinct records.

pub mod compactor;
pub mod error;
pub mod expander;
pub mod fields;

use std::collections::BTreeMap;

pub use compactor::{compact, CompactorConfig, RecordCompactor};
pub use error::{CodecError, CodecResult};
pub use expander::RecordExpander;
pub use fields::FIELD_SEPARATOR;

/// A record as physically stored in an index chunk.
pub type EncodedRecord = BTreeMap<String, String>;
