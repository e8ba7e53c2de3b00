use thiserror::Error;

/// Errors produced by record operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("unknown record type: {0}")]
    UnknownType(String),

    #[error("field {field} expects a {expected} value")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

/// Convenience alias for record results.
pub type RecordResult<T> = Result<T, RecordError>;
