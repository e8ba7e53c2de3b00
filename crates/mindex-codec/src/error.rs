use mindex_record::RecordType;
use thiserror::Error;

use crate::EncodedRecord;

/// Errors produced while compacting or expanding records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// An artifact record lacks group id, artifact id or version.
    #[error("{record_type} record is missing identity fields: {}", .missing.join(", "))]
    MissingIdentity {
        record_type: RecordType,
        missing: Vec<&'static str>,
    },

    /// No marker key identifies the record type.
    #[error("unrecognized encoded record: {0:?}")]
    UnrecognizedRecord(EncodedRecord),

    /// A composite field has the wrong number of segments.
    #[error("malformed {field} field: expected {expected} segments, got {actual}")]
    MalformedField {
        field: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("unsupported index descriptor version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
