//! `courier-registry` — fixed-capacity string-keyed storage for the network
//! topology.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`table`]   | `KeyedTable<T>`: open addressing, quadratic probing, tombstones |
//! | [`city`]    | `CityRecord`, `CityRegistry`                              |
//! | [`route`]   | `RouteRecord`, `RouteRegistry`, route-key helpers         |
//! | [`error`]   | `RegistryError`, `RegistryResult`                         |
//!
//! # Design
//!
//! The registries are the system of record for cities and inter-city routes.
//! Capacity is fixed at construction (default 97 slots) and the table never
//! resizes; a saturated probe chain surfaces as an ordinary
//! [`RegistryError::TableFull`] result.  The route graph is a disposable
//! derivation of these tables: mutate here, then rebuild there.

pub mod city;
pub mod error;
pub mod route;
pub mod table;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use city::{CityRecord, CityRegistry};
pub use error::{RegistryError, RegistryResult};
pub use route::{route_key, split_route_key, RouteRecord, RouteRegistry};
pub use table::{ChecksumHasher, KeyHasher, KeyedTable, DEFAULT_CAPACITY};
