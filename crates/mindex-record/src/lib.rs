//! Typed index records for the Maven index format.
//!
//! A [`Record`] is the semantically-named view of one entry in an index
//! chunk: the chunk descriptor, a group listing, or an artifact addition or
//! removal. Fields are addressed through typed [`EntryKey`]s so a lookup
//! always yields the value type the field is defined with.
//!
//! # Key Types
//!
//! - [`RecordType`] -- The closed set of record variants
//! - [`Record`] -- A record type plus its named field values
//! - [`EntryKey`] -- A named, typed field key (see [`keys`] for the vocabulary)
//! - [`Value`] -- A single field value

pub mod error;
pub mod key;
pub mod kind;
pub mod record;
pub mod value;

pub use error::{RecordError, RecordResult};
pub use key::{keys, EntryKey};
pub use kind::RecordType;
pub use record::Record;
pub use value::{FieldValue, Value};
