//! The tick-driven delivery scheduler.
//!
//! # Cadence model
//!
//! Movement is discrete: each call to [`DeliveryScheduler::advance_step`] is
//! one tick.  A package in a moving status accumulates ticks until its
//! service class's cadence threshold (Overnight 1, TwoDay 2, Normal 3), then
//! spends them on one hop along the current shortest path.  The hop target is
//! recomputed from the live graph on every move, so a road blocked mid-route
//! immediately redirects (or strands) the package: there is no cached route
//! to go stale.
//!
//! # Persistence
//!
//! Every mutated package is written through the caller-supplied
//! [`PackageStore`] before the operation returns, including pure counter
//! increments.  A process crash therefore never loses more than the
//! operation in flight.

use courier_core::{PackageId, PackageStatus, RiderId, SimClock};
use courier_graph::RouteGraph;
use tracing::debug;

use crate::error::{DispatchError, DispatchResult};
use crate::package::{
    quote_price, Package, PackageIntake, TraceEntry, MAX_DELIVERY_ATTEMPTS, TRACE_DELIVERED,
    TRACE_RETURNED, TRACE_THIRD_FAILURE,
};
use crate::rider::{Rider, RiderAction, RiderRoster, Vehicle};
use crate::store::PackageStore;
use crate::TickEvent;

/// Aggregate network statistics, folded over every package ever created.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStats {
    /// Sum of every package's price, terminal or not.
    pub revenue: f64,
    pub delivered: usize,
    /// Packages between cities or out with a rider.
    pub in_transit: usize,
    /// Packages returned to sender.
    pub failed: usize,
}

impl std::fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "revenue ${:.2} | delivered {} | in transit {} | returned {}",
            self.revenue, self.delivered, self.in_transit, self.failed
        )
    }
}

/// Owns the package collection and the rider roster, and advances both
/// through simulated time.
///
/// The scheduler holds no reference to the graph or to a store; both are
/// passed into the operations that need them, so each caller decides how
/// routing and persistence are wired.
pub struct DeliveryScheduler {
    clock: SimClock,

    /// Every package ever created, sorted by id.  Iteration order is
    /// therefore id order, which fixes the order of emitted tick events.
    packages: Vec<Package>,

    roster: RiderRoster,

    /// Next id `create_package` will assign.
    next_package_id: u32,
}

impl DeliveryScheduler {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            packages: Vec::new(),
            roster: RiderRoster::new(),
            next_package_id: 0,
        }
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    // ── Intake ────────────────────────────────────────────────────────────

    /// Register a new package, price it, and persist it.
    ///
    /// The initial route plan is the current shortest path from source to
    /// destination; an unreachable destination leaves the plan empty, which
    /// is not an error.  The package simply waits until a route opens.
    pub fn create_package<S: PackageStore>(
        &mut self,
        intake: PackageIntake,
        graph:  &RouteGraph,
        store:  &mut S,
    ) -> DispatchResult<PackageId> {
        let id = PackageId(self.next_package_id);
        let now = self.clock.current_unix_secs();
        let plan = graph
            .shortest_path(&intake.source_city, &intake.dest_city)
            .map(|path| path.cities)
            .unwrap_or_default();
        let history = vec![TraceEntry::new(&intake.source_city, now)];

        let package = Package {
            id,
            sender:       intake.sender,
            receiver:     intake.receiver,
            address:      intake.address,
            current_city: intake.source_city.clone(),
            source_city:  intake.source_city,
            dest_city:    intake.dest_city,
            service:      intake.service,
            weight_kg:    intake.weight_kg,
            status:       PackageStatus::Created,
            ticks_waited: 0,
            attempts:     0,
            rider:        None,
            price:        quote_price(intake.service, intake.weight_kg),
            history,
            plan,
        };

        store.upsert_package(&package)?;
        self.next_package_id += 1;
        self.packages.push(package);
        Ok(id)
    }

    // ── Tick advancement ──────────────────────────────────────────────────

    /// Advance the simulation by one tick.
    ///
    /// Every package in a moving status (`Loaded`, `InTransit`) accumulates
    /// one tick; those that reach their cadence threshold consult the graph
    /// and take one hop.  Returns the movement events in package-id order,
    /// then advances the clock.
    pub fn advance_step<S: PackageStore>(
        &mut self,
        graph: &RouteGraph,
        store: &mut S,
    ) -> DispatchResult<Vec<TickEvent>> {
        let now = self.clock.current_unix_secs();
        let mut events = Vec::new();

        for package in &mut self.packages {
            if !package.status.is_moving() {
                continue;
            }

            package.ticks_waited += 1;
            if package.ticks_waited < u32::from(package.service.cadence_ticks()) {
                // Not this package's turn yet; keep the accumulator durable.
                store.upsert_package(package)?;
                continue;
            }
            package.ticks_waited = 0;

            match graph.next_hop(&package.current_city, &package.dest_city) {
                None => {
                    events.push(TickEvent::Waiting {
                        package: package.id,
                        city:    package.current_city.clone(),
                    });
                }
                Some(hop) if hop == package.current_city => {
                    // Already standing at the destination.
                    package.status = PackageStatus::Arrived;
                    package.history.push(TraceEntry::new(&package.current_city, now));
                    package.plan.clear();
                    events.push(TickEvent::Arrived {
                        package: package.id,
                        city:    package.current_city.clone(),
                    });
                }
                Some(hop) => {
                    package.current_city = hop.clone();
                    package.history.push(TraceEntry::new(&hop, now));
                    if package.current_city == package.dest_city {
                        package.status = PackageStatus::Arrived;
                        package.plan.clear();
                    } else {
                        package.status = PackageStatus::InTransit;
                        package.plan = graph
                            .shortest_path(&package.current_city, &package.dest_city)
                            .map(|path| path.cities)
                            .unwrap_or_default();
                    }
                    events.push(TickEvent::Moved { package: package.id, to: hop });
                }
            }
            store.upsert_package(package)?;
        }

        self.clock.advance();
        debug!(tick = %self.clock.current_tick, events = events.len(), "tick advanced");
        Ok(events)
    }

    // ── Operator transitions ──────────────────────────────────────────────

    /// Manually set a package's status (load onto a vehicle, park at a hub,
    /// force a return).
    ///
    /// A terminal package refuses any further transition.  Moving to
    /// `Returned` records the return in the history and drops the remaining
    /// route plan; every other target changes the status alone.
    pub fn update_status<S: PackageStore>(
        &mut self,
        id:     PackageId,
        status: PackageStatus,
        store:  &mut S,
    ) -> DispatchResult<()> {
        let now = self.clock.current_unix_secs();
        let package = self.package_entry(id)?;
        if package.status.is_terminal() {
            return Err(DispatchError::InvalidTransition {
                id,
                from: package.status,
                action: "update the status of",
            });
        }

        if status == PackageStatus::Returned {
            package.history.push(TraceEntry::new(TRACE_RETURNED, now));
            package.plan.clear();
        }
        package.status = status;
        store.upsert_package(package)?;
        Ok(())
    }

    /// Hand a batch of packages to `rider` for last-mile delivery.
    ///
    /// Only packages in an assignable status (`Arrived`, `AtHub`) are taken;
    /// unknown ids and packages in any other status are skipped rather than
    /// failing the batch.  Returns how many were assigned.
    pub fn assign_rider<S: PackageStore>(
        &mut self,
        rider: RiderId,
        ids:   &[PackageId],
        store: &mut S,
    ) -> DispatchResult<usize> {
        if !self.roster.contains(rider) {
            return Err(DispatchError::UnknownRider(rider));
        }

        let mut assigned = 0;
        for &id in ids {
            let Some(idx) = self.index_of(id) else { continue };
            let package = &mut self.packages[idx];
            if !package.status.is_assignable() {
                continue;
            }
            package.rider = Some(rider);
            package.status = PackageStatus::OutForDelivery;
            store.upsert_package(package)?;
            assigned += 1;
        }
        Ok(assigned)
    }

    /// Record the outcome of a rider's delivery attempt.
    ///
    /// Valid only while the package is `OutForDelivery`.  A success is
    /// terminal; a failure burns one attempt and, at the limit, returns the
    /// package to sender for good.
    pub fn rider_action<S: PackageStore>(
        &mut self,
        id:     PackageId,
        action: RiderAction,
        store:  &mut S,
    ) -> DispatchResult<()> {
        let now = self.clock.current_unix_secs();
        let package = self.package_entry(id)?;
        if package.status != PackageStatus::OutForDelivery {
            return Err(DispatchError::InvalidTransition {
                id,
                from: package.status,
                action: action.verb(),
            });
        }

        match action {
            RiderAction::Delivered => {
                package.history.push(TraceEntry::new(TRACE_DELIVERED, now));
                package.plan.clear();
                package.status = PackageStatus::Delivered;
            }
            RiderAction::Failed => {
                package.attempts += 1;
                if package.attempts >= MAX_DELIVERY_ATTEMPTS {
                    package.history.push(TraceEntry::new(TRACE_THIRD_FAILURE, now));
                    package.plan.clear();
                    package.status = PackageStatus::Returned;
                }
                // Below the limit the package stays OutForDelivery for the
                // next attempt.
            }
        }
        store.upsert_package(package)?;
        Ok(())
    }

    // ── Riders ────────────────────────────────────────────────────────────

    /// Register a rider and return the assigned id.
    pub fn add_rider(&mut self, username: &str, secret: &str, vehicle: Vehicle, city: &str) -> RiderId {
        self.roster.add(username, secret, vehicle, city)
    }

    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.roster.get(id)
    }

    pub fn riders_for_city(&self, city: &str) -> Vec<&Rider> {
        self.roster.for_city(city)
    }

    pub fn roster(&self) -> &RiderRoster {
        &self.roster
    }

    // ── Hydration (store-load path) ───────────────────────────────────────

    /// Insert or replace a package wholesale, keeping the id ordering.
    pub fn hydrate_package(&mut self, package: Package) {
        self.next_package_id = self.next_package_id.max(package.id.0 + 1);
        match self.packages.binary_search_by_key(&package.id, |p| p.id) {
            Ok(i)  => self.packages[i] = package,
            Err(i) => self.packages.insert(i, package),
        }
    }

    /// Insert or replace a rider wholesale.
    pub fn hydrate_rider(&mut self, rider: Rider) {
        self.roster.hydrate(rider);
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.index_of(id).map(|i| &self.packages[i])
    }

    /// Every package, in id order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The manager view: packages that originate in, sit in, or are headed
    /// to `city`.
    pub fn packages_for_city(&self, city: &str) -> Vec<&Package> {
        self.packages.iter().filter(|p| p.touches_city(city)).collect()
    }

    /// Packages currently out with `rider`.
    pub fn packages_for_rider(&self, rider: RiderId) -> Vec<&Package> {
        self.packages
            .iter()
            .filter(|p| p.rider == Some(rider) && p.status == PackageStatus::OutForDelivery)
            .collect()
    }

    /// Fold the whole collection into aggregate statistics.  Pure read.
    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats::default();
        for package in &self.packages {
            stats.revenue += package.price;
            match package.status {
                PackageStatus::Delivered => stats.delivered += 1,
                PackageStatus::InTransit | PackageStatus::OutForDelivery => stats.in_transit += 1,
                PackageStatus::Returned => stats.failed += 1,
                _ => {}
            }
        }
        stats
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn index_of(&self, id: PackageId) -> Option<usize> {
        self.packages.binary_search_by_key(&id, |p| p.id).ok()
    }

    fn package_entry(&mut self, id: PackageId) -> DispatchResult<&mut Package> {
        let idx = self.index_of(id).ok_or(DispatchError::UnknownPackage(id))?;
        Ok(&mut self.packages[idx])
    }
}
