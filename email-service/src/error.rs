//! Error types for store operations

use thiserror::Error;

/// Errors returned by [`EmailStore`](crate::store::EmailStore) operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Missing or malformed input; raised before anything touches storage
    #[error("{0}")]
    Validation(String),

    /// No email with this id exists
    #[error("Email not found")]
    NotFound(i64),

    /// The underlying SQLite operation failed
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A previous holder of the connection lock panicked
    #[error("storage error: database lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
