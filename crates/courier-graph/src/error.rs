//! Graph-subsystem error type.

use thiserror::Error;

/// Errors produced by `courier-graph` queries.
///
/// Both variants mean "this query has no answer", not "the program is
/// broken"; callers like the tick scheduler treat either as "no route and
/// keep waiting".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("city {0:?} is not on the map")]
    UnknownCity(String),

    #[error("no open route from {from:?} to {to:?}")]
    NoPath { from: String, to: String },
}

pub type GraphResult<T> = Result<T, GraphError>;
