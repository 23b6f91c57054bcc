//! `courier-core` — foundational types for the `courier` delivery-network
//! simulator.
//!
//! This crate is a dependency of every other `courier-*` crate.  It
//! intentionally has no `courier-*` dependencies and no external ones beyond
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `CityId`, `PackageId`, `RiderId`, `NodeIdx`           |
//! | [`layout`]   | `LayoutPoint`, the map-canvas coordinate type         |
//! | [`time`]     | `Tick`, `SimClock`                                    |
//! | [`service`]  | `ServiceClass` enum (delivery speed tier)             |
//! | [`status`]   | `PackageStatus` enum and its state-machine predicates |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod layout;
pub mod service;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{CityId, NodeIdx, PackageId, RiderId};
pub use layout::LayoutPoint;
pub use service::ServiceClass;
pub use status::PackageStatus;
pub use time::{SimClock, Tick};
