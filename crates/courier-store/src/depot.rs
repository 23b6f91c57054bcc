//! The persistence trait the hub drives.

use courier_dispatch::{Package, PackageStore, Rider};
use courier_registry::{CityRecord, RouteRecord};

use crate::error::DepotResult;

/// Full load/save access to the network's durable state.
///
/// Registries and the rider roster are saved as whole snapshots (they are
/// small and change rarely); packages are written one at a time through the
/// [`PackageStore`] supertrait, once per mutating scheduler operation.
///
/// `save_*` calls replace the stored snapshot entirely, so records removed
/// from a registry disappear from the store as well.
pub trait DepotStore: PackageStore {
    fn load_cities(&mut self) -> DepotResult<Vec<CityRecord>>;
    fn save_cities(&mut self, snapshot: &[CityRecord]) -> DepotResult<()>;

    fn load_routes(&mut self) -> DepotResult<Vec<RouteRecord>>;
    fn save_routes(&mut self, snapshot: &[RouteRecord]) -> DepotResult<()>;

    fn load_riders(&mut self) -> DepotResult<Vec<Rider>>;
    fn save_riders(&mut self, snapshot: &[Rider]) -> DepotResult<()>;

    /// All stored packages, in id order.
    fn load_packages(&mut self) -> DepotResult<Vec<Package>>;
}
