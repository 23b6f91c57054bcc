use courier_dispatch::DispatchError;
use courier_graph::GraphError;
use courier_registry::RegistryError;
use courier_store::DepotError;
use thiserror::Error;

/// The one error type the shell sees; every component error folds into it.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("map error: {0}")]
    Graph(#[from] GraphError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("store error: {0}")]
    Store(#[from] DepotError),
}

pub type HubResult<T> = Result<T, HubError>;
