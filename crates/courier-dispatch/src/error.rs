use courier_core::{PackageId, PackageStatus, RiderId};
use thiserror::Error;

use crate::StoreError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no package with id {0}")]
    UnknownPackage(PackageId),

    #[error("no rider with id {0}")]
    UnknownRider(RiderId),

    #[error("cannot {action} {id}: status is {from}")]
    InvalidTransition {
        id:     PackageId,
        from:   PackageStatus,
        action: &'static str,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
