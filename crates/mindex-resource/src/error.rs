/// Errors from resource operations.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The name cannot be resolved below the handler's base.
    #[error("invalid resource name: {0}")]
    InvalidName(String),

    /// The URI could not be parsed.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// The URI scheme has no reader.
    #[error("unsupported URI scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
