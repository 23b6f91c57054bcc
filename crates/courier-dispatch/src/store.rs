//! The persistence seam the scheduler writes through.
//!
//! The scheduler never talks to a database directly; it upserts every mutated
//! package through a [`PackageStore`] so the caller decides where (if
//! anywhere) packages land.  Backends live in their own crate and plug in via
//! this trait.

use thiserror::Error;

use crate::Package;

/// A persistence failure, as the scheduler sees it.
///
/// Backends wrap their native error (SQLite, I/O, codec) in here; the
/// scheduler only propagates it, it never inspects it.
#[derive(Debug, Error)]
#[error("package store failure: {0}")]
pub struct StoreError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl StoreError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(source.into())
    }
}

/// Write access to wherever packages are persisted.
///
/// Called after every mutating scheduler operation, while the caller's
/// serialization boundary is held, so a crash never loses more than the
/// in-flight operation.
pub trait PackageStore {
    fn upsert_package(&mut self, package: &Package) -> Result<(), StoreError>;
}

/// A [`PackageStore`] that discards every write.
///
/// Useful in tests and throwaway simulations that keep everything in memory.
pub struct NoopStore;

impl PackageStore for NoopStore {
    fn upsert_package(&mut self, _package: &Package) -> Result<(), StoreError> {
        Ok(())
    }
}
