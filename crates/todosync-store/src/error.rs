//! Error types for todosync store operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a persistence slot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key is empty or contains characters outside `[A-Za-z0-9._-]`.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Failed to acquire the in-memory store lock.
    #[error("Store lock error")]
    LockError,

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
