use std::path::PathBuf;

/// Errors from world state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Keys must be non-empty strings.
    #[error("key must not be an empty string")]
    EmptyKey,

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted state file could not be decoded.
    #[error("corrupt state file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A lock guarding the in-process map was poisoned.
    #[error("state lock poisoned")]
    LockPoisoned,

    /// Failure reported by the backend itself (e.g. the host peer).
    #[error("backend error: {0}")]
    Backend(String),

    /// The range-scan cursor was used after it was closed.
    #[error("range scan cursor already closed")]
    CursorClosed,
}

/// Result alias for world state operations.
pub type StateResult<T> = Result<T, StateError>;
