//! Registry-subsystem error type.

use thiserror::Error;

/// Errors produced by `courier-registry`.
///
/// All variants are ordinary recoverable results: a full table or a missing
/// key is a fact about the data, not a fault in the program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("table full: probe sequence exhausted for key {key:?} (capacity {capacity})")]
    TableFull { key: String, capacity: usize },

    #[error("key {0:?} not found")]
    KeyNotFound(String),

    #[error("key {0:?} already registered")]
    DuplicateKey(String),

    #[error("malformed route key {0:?}: expected \"CityA-CityB\"")]
    MalformedRouteKey(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
