//! In-memory backend, for tests and throwaway simulations.

use std::collections::BTreeMap;

use courier_dispatch::{Package, PackageStore, Rider, StoreError};
use courier_registry::{CityRecord, RouteRecord};

use crate::depot::DepotStore;
use crate::error::DepotResult;

/// A [`DepotStore`] that keeps everything in plain collections.
///
/// Packages live in a `BTreeMap` keyed by id so `load_packages` returns them
/// in id order, matching the SQLite backend.
#[derive(Default)]
pub struct MemoryStore {
    cities:   Vec<CityRecord>,
    routes:   Vec<RouteRecord>,
    riders:   Vec<Rider>,
    packages: BTreeMap<u32, Package>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PackageStore for MemoryStore {
    fn upsert_package(&mut self, package: &Package) -> Result<(), StoreError> {
        self.packages.insert(package.id.0, package.clone());
        Ok(())
    }
}

impl DepotStore for MemoryStore {
    fn load_cities(&mut self) -> DepotResult<Vec<CityRecord>> {
        Ok(self.cities.clone())
    }

    fn save_cities(&mut self, snapshot: &[CityRecord]) -> DepotResult<()> {
        self.cities = snapshot.to_vec();
        Ok(())
    }

    fn load_routes(&mut self) -> DepotResult<Vec<RouteRecord>> {
        Ok(self.routes.clone())
    }

    fn save_routes(&mut self, snapshot: &[RouteRecord]) -> DepotResult<()> {
        self.routes = snapshot.to_vec();
        Ok(())
    }

    fn load_riders(&mut self) -> DepotResult<Vec<Rider>> {
        Ok(self.riders.clone())
    }

    fn save_riders(&mut self, snapshot: &[Rider]) -> DepotResult<()> {
        self.riders = snapshot.to_vec();
        Ok(())
    }

    fn load_packages(&mut self) -> DepotResult<Vec<Package>> {
        Ok(self.packages.values().cloned().collect())
    }
}
