//! Error types for courier-store.

use thiserror::Error;

/// Errors that can occur while loading or saving network state.
#[derive(Debug, Error)]
pub enum DepotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored row could not be decoded (bad enum label, malformed trace).
    #[error("corrupt stored record: {0}")]
    Corrupt(String),
}

/// Alias for `Result<T, DepotError>`.
pub type DepotResult<T> = Result<T, DepotError>;

impl From<DepotError> for courier_dispatch::StoreError {
    fn from(err: DepotError) -> Self {
        courier_dispatch::StoreError::new(err)
    }
}
