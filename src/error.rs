//! Domain error taxonomy.
//!
//! One enum spans the whole write/read path so repositories and services can
//! branch on typed outcomes (not-found, already-exists, precondition
//! violations) instead of string matching. Adapter-level failures collapse
//! into `Internal`/`Unavailable`.

/// Result type for toggle operations.
pub type Result<T> = std::result::Result<T, ToggleError>;

/// Errors that can occur across the toggle subsystem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    /// The request carried no toggle (empty key).
    #[error("toggle instance is empty")]
    EmptyToggle,

    /// The key contains characters outside alphanumeric and dash.
    #[error("toggle key must contain only alphanumeric and dash characters")]
    InvalidKey,

    /// No toggle with the requested key exists.
    #[error("toggle not found")]
    NotFound,

    /// A toggle with the same key already exists.
    #[error("toggle key already exists")]
    AlreadyExists,

    /// The toggle is enabled and therefore cannot be deleted.
    #[error("toggle is enabled hence it can't be deleted")]
    ProhibitedToDelete,

    /// A dependency (store, cache, broker) is unreachable.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Unexpected failure inside an adapter.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToggleError {
    /// Shorthand for an internal error with a formatted message.
    pub fn internal(message: impl std::fmt::Display) -> Self {
        ToggleError::Internal(message.to_string())
    }

    /// Shorthand for an unavailable error with a formatted message.
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        ToggleError::Unavailable(message.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for ToggleError {
    fn from(err: redis::RedisError) -> Self {
        ToggleError::internal(err)
    }
}
