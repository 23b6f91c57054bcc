//! The hub facade and its single lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use courier_core::{CityId, LayoutPoint, PackageId, PackageStatus, RiderId, SimClock, Tick};
use courier_dispatch::{
    DeliveryScheduler, NetworkStats, Package, PackageIntake, Rider, RiderAction, TickEvent,
    Vehicle,
};
use courier_graph::{RouteGraph, RoutePath, DEFAULT_LAYOUT_ITERATIONS};
use courier_registry::{CityRecord, CityRegistry, RouteRegistry};
use courier_store::DepotStore;

use crate::error::HubResult;
use crate::snapshot::{MapLinkDto, MapNodeDto, MapSnapshot};

// ── Guarded state ─────────────────────────────────────────────────────────────

/// Everything behind the lock.  Registries are the system of record, the
/// graph is their routing view, the scheduler owns packages and riders, and
/// the store keeps all of it durable.
struct HubState<S> {
    cities:   CityRegistry,
    routes:   RouteRegistry,
    graph:    RouteGraph,
    dispatch: DeliveryScheduler,
    store:    S,
}

impl<S: DepotStore> HubState<S> {
    /// Rebuild the map from the registries, settle the layout, and write the
    /// assigned coordinates back so they survive a restart.
    fn refresh_map(&mut self) -> HubResult<()> {
        let summary = self.graph.rebuild(&self.cities, &self.routes);
        self.graph.relax_layout(DEFAULT_LAYOUT_ITERATIONS);
        for node in self.graph.nodes() {
            self.cities.set_position(&node.name, node.pos)?;
        }
        let snapshot = self.cities.snapshot();
        self.store.save_cities(&snapshot)?;
        debug!(
            cities  = summary.cities,
            links   = summary.links,
            skipped = summary.skipped,
            "map refreshed"
        );
        Ok(())
    }
}

// ── CourierHub ────────────────────────────────────────────────────────────────

/// The serialization boundary of the whole network.
///
/// Every public operation takes the one mutex for its full duration, so each
/// call is atomic with respect to every other: concurrent registry inserts
/// cannot interleave inside a probe chain, and a tick cannot observe a route
/// half-blocked.  Persistence happens while the lock is held; when a call
/// returns, the store already reflects it.
pub struct CourierHub<S> {
    state: Mutex<HubState<S>>,
}

impl<S: DepotStore> CourierHub<S> {
    /// Hydrate a hub from whatever `store` holds, with the clock at its
    /// default epoch.
    pub fn open(store: S) -> HubResult<Self> {
        Self::open_with_clock(store, SimClock::default())
    }

    /// Hydrate registries, riders, and packages from the store, then build
    /// the routing graph.
    pub fn open_with_clock(mut store: S, clock: SimClock) -> HubResult<Self> {
        let mut cities = CityRegistry::new();
        for record in store.load_cities()? {
            cities.hydrate(record)?;
        }

        let mut routes = RouteRegistry::new();
        for record in store.load_routes()? {
            routes.hydrate(record)?;
        }

        let mut dispatch = DeliveryScheduler::new(clock);
        for rider in store.load_riders()? {
            dispatch.hydrate_rider(rider);
        }
        for package in store.load_packages()? {
            dispatch.hydrate_package(package);
        }

        let mut graph = RouteGraph::new();
        graph.rebuild(&cities, &routes);

        debug!(
            cities   = cities.active_count(),
            routes   = routes.active_count(),
            riders   = dispatch.roster().len(),
            packages = dispatch.packages().len(),
            "hub opened"
        );

        Ok(Self {
            state: Mutex::new(HubState { cities, routes, graph, dispatch, store }),
        })
    }

    /// A poisoned lock still hands back the state.  Every operation persists
    /// before returning, so the worst a panicking holder can lose is its own
    /// half-finished call.
    fn locked(&self) -> MutexGuard<'_, HubState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Network topology ──────────────────────────────────────────────────

    /// Register a city and refresh the map.
    pub fn add_city(&self, name: &str, secret: &str) -> HubResult<CityId> {
        let mut state = self.locked();
        let id = state.cities.add(name, secret)?;
        state.refresh_map()?;
        Ok(id)
    }

    /// Drop a city.  Routes that still name it stay registered but fall out
    /// of the graph until the other endpoint returns.
    pub fn remove_city(&self, name: &str) -> HubResult<()> {
        let mut state = self.locked();
        state.cities.remove(name)?;
        state.refresh_map()?;
        Ok(())
    }

    /// Register (or re-price) the route between two cities.
    pub fn add_route(&self, a: &str, b: &str, distance: u32) -> HubResult<()> {
        let mut guard = self.locked();
        let state = &mut *guard;
        state.routes.add(a, b, distance)?;
        let snapshot = state.routes.snapshot();
        state.store.save_routes(&snapshot)?;
        state.refresh_map()?;
        Ok(())
    }

    /// Delete a route by its stored key (`"A-B"` as registered).
    pub fn remove_route(&self, key: &str) -> HubResult<()> {
        let mut guard = self.locked();
        let state = &mut *guard;
        state.routes.remove(key)?;
        let snapshot = state.routes.snapshot();
        state.store.save_routes(&snapshot)?;
        state.refresh_map()?;
        Ok(())
    }

    /// Open or close a route for traffic without forgetting its distance.
    pub fn set_route_blocked(&self, key: &str, blocked: bool) -> HubResult<()> {
        let mut guard = self.locked();
        let state = &mut *guard;
        state.routes.set_blocked(key, blocked)?;
        let snapshot = state.routes.snapshot();
        state.store.save_routes(&snapshot)?;
        state.refresh_map()?;
        Ok(())
    }

    /// Drag one city to a new canvas position.  Updates the registry and the
    /// live node in place; no rebuild.
    pub fn move_city(&self, name: &str, pos: LayoutPoint) -> HubResult<()> {
        let mut guard = self.locked();
        let state = &mut *guard;
        state.cities.set_position(name, pos)?;
        state.graph.set_node_position(name, pos);
        let snapshot = state.cities.snapshot();
        state.store.save_cities(&snapshot)?;
        Ok(())
    }

    // ── Map reads ─────────────────────────────────────────────────────────

    pub fn shortest_path(&self, from: &str, to: &str) -> HubResult<RoutePath> {
        Ok(self.locked().graph.shortest_path(from, to)?)
    }

    pub fn next_hop(&self, from: &str, to: &str) -> Option<String> {
        self.locked().graph.next_hop(from, to)
    }

    /// The whole drawable network in one value.
    pub fn map_snapshot(&self) -> MapSnapshot {
        let state = self.locked();
        let nodes = state
            .graph
            .nodes()
            .iter()
            .map(|node| MapNodeDto {
                name: node.name.clone(),
                x:    node.pos.x,
                y:    node.pos.y,
            })
            .collect();
        let links = state
            .graph
            .links()
            .map(|link| {
                let nodes = state.graph.nodes();
                MapLinkDto {
                    from:     nodes[link.a.index()].name.clone(),
                    to:       nodes[link.b.index()].name.clone(),
                    distance: link.weight,
                    blocked:  link.blocked,
                }
            })
            .collect();
        MapSnapshot { nodes, links }
    }

    // ── Package lifecycle ─────────────────────────────────────────────────

    pub fn create_package(&self, intake: PackageIntake) -> HubResult<PackageId> {
        let mut guard = self.locked();
        let state = &mut *guard;
        Ok(state.dispatch.create_package(intake, &state.graph, &mut state.store)?)
    }

    /// Advance the network one tick and report what moved.
    pub fn advance_tick(&self) -> HubResult<Vec<TickEvent>> {
        let mut guard = self.locked();
        let state = &mut *guard;
        Ok(state.dispatch.advance_step(&state.graph, &mut state.store)?)
    }

    pub fn update_package_status(&self, id: PackageId, status: PackageStatus) -> HubResult<()> {
        let mut guard = self.locked();
        let state = &mut *guard;
        Ok(state.dispatch.update_status(id, status, &mut state.store)?)
    }

    /// Hand a batch of packages to a rider; returns how many were taken.
    pub fn assign_rider(&self, rider: RiderId, ids: &[PackageId]) -> HubResult<usize> {
        let mut guard = self.locked();
        let state = &mut *guard;
        Ok(state.dispatch.assign_rider(rider, ids, &mut state.store)?)
    }

    pub fn rider_action(&self, id: PackageId, action: RiderAction) -> HubResult<()> {
        let mut guard = self.locked();
        let state = &mut *guard;
        Ok(state.dispatch.rider_action(id, action, &mut state.store)?)
    }

    // ── Riders ────────────────────────────────────────────────────────────

    /// Register a rider and persist the roster.
    pub fn add_rider(
        &self,
        username: &str,
        secret:   &str,
        vehicle:  Vehicle,
        city:     &str,
    ) -> HubResult<RiderId> {
        let mut guard = self.locked();
        let state = &mut *guard;
        let id = state.dispatch.add_rider(username, secret, vehicle, city);
        let snapshot = state.dispatch.roster().snapshot();
        state.store.save_riders(&snapshot)?;
        Ok(id)
    }

    pub fn riders_for_city(&self, city: &str) -> Vec<Rider> {
        self.locked().dispatch.riders_for_city(city).into_iter().cloned().collect()
    }

    // ── State reads ───────────────────────────────────────────────────────

    pub fn package(&self, id: PackageId) -> Option<Package> {
        self.locked().dispatch.package(id).cloned()
    }

    pub fn packages(&self) -> Vec<Package> {
        self.locked().dispatch.packages().to_vec()
    }

    pub fn packages_for_city(&self, city: &str) -> Vec<Package> {
        self.locked().dispatch.packages_for_city(city).into_iter().cloned().collect()
    }

    pub fn packages_for_rider(&self, rider: RiderId) -> Vec<Package> {
        self.locked().dispatch.packages_for_rider(rider).into_iter().cloned().collect()
    }

    pub fn stats(&self) -> NetworkStats {
        self.locked().dispatch.stats()
    }

    pub fn cities(&self) -> Vec<CityRecord> {
        self.locked().cities.snapshot()
    }

    pub fn current_tick(&self) -> Tick {
        self.locked().dispatch.clock().current_tick
    }
}
