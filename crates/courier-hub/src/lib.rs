//! `courier-hub` — the one-lock facade over the delivery network.
//!
//! [`CourierHub`] owns every moving part behind a single mutex: the city and
//! route registries, the routing graph derived from them, the delivery
//! scheduler, and the persistence backend.  Callers on any thread share one
//! hub; each operation is atomic and durable by the time it returns.
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`hub`]      | `CourierHub`, the guarded state, refresh flow  |
//! | [`snapshot`] | serializable map DTOs for front ends           |
//! | [`error`]    | `HubError`, `HubResult`                        |

pub mod error;
pub mod hub;
pub mod snapshot;


pub use error::{HubError, HubResult};
pub use hub::CourierHub;
pub use snapshot::{MapLinkDto, MapNodeDto, MapSnapshot};
