//! Unit tests for courier-dispatch.

#[cfg(test)]
mod helpers {
    use courier_core::{PackageId, PackageStatus, ServiceClass, SimClock};
    use courier_graph::RouteGraph;
    use courier_registry::{CityRegistry, RouteRegistry};

    use crate::{DeliveryScheduler, Package, PackageIntake, PackageStore, StoreError};

    pub const SIM_START: i64 = 1_700_000_000;
    pub const TICK_SECS: u32 = 3_600;

    /// Austin --195-- Dallas --240-- Houston, as both registries + the graph.
    pub fn texas() -> (CityRegistry, RouteRegistry, RouteGraph) {
        let mut cities = CityRegistry::new();
        cities.add("Austin", "pw-a").unwrap();
        cities.add("Dallas", "pw-d").unwrap();
        cities.add("Houston", "pw-h").unwrap();

        let mut routes = RouteRegistry::new();
        routes.add("Austin", "Dallas", 195).unwrap();
        routes.add("Dallas", "Houston", 240).unwrap();

        let mut graph = RouteGraph::new();
        graph.rebuild(&cities, &routes);
        (cities, routes, graph)
    }

    pub fn scheduler() -> DeliveryScheduler {
        DeliveryScheduler::new(SimClock::new(SIM_START, TICK_SECS))
    }

    pub fn intake(service: ServiceClass, weight_kg: f64) -> PackageIntake {
        PackageIntake {
            sender:      "Ann".into(),
            receiver:    "Bob".into(),
            address:     "12 Elm St".into(),
            source_city: "Austin".into(),
            dest_city:   "Houston".into(),
            service,
            weight_kg,
        }
    }

    /// A [`PackageStore`] that records every write, newest last.
    #[derive(Default)]
    pub struct RecordingStore {
        pub writes: Vec<Package>,
    }

    impl RecordingStore {
        pub fn last(&self) -> &Package {
            self.writes.last().expect("store saw no writes")
        }
    }

    impl PackageStore for RecordingStore {
        fn upsert_package(&mut self, package: &Package) -> Result<(), StoreError> {
            self.writes.push(package.clone());
            Ok(())
        }
    }

    /// A package for hydration tests; contents are arbitrary but valid.
    pub fn bare_package(id: u32) -> Package {
        Package {
            id:           PackageId(id),
            sender:       "Ann".into(),
            receiver:     "Bob".into(),
            address:      "12 Elm St".into(),
            source_city:  "Austin".into(),
            dest_city:    "Houston".into(),
            current_city: "Austin".into(),
            service:      ServiceClass::Normal,
            weight_kg:    1.0,
            status:       PackageStatus::Created,
            ticks_waited: 0,
            attempts:     0,
            rider:        None,
            price:        6.2,
            history:      Vec::new(),
            plan:         Vec::new(),
        }
    }
}

// ── Pricing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pricing {
    use courier_core::ServiceClass;

    use crate::quote_price;

    #[test]
    fn overnight_two_kg_quote() {
        // 5.0 base + 2.0 kg x 1.2 + 20.0 surcharge
        assert!((quote_price(ServiceClass::Overnight, 2.0) - 27.4).abs() < 1e-9);
    }

    #[test]
    fn surcharge_tiers() {
        assert!((quote_price(ServiceClass::Normal, 2.0) - 7.4).abs() < 1e-9);
        assert!((quote_price(ServiceClass::TwoDay, 2.0) - 17.4).abs() < 1e-9);
    }
}

// ── Intake ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod intake {
    use courier_core::{PackageStatus, ServiceClass};

    use super::helpers::{self, RecordingStore};

    #[test]
    fn starts_created_with_history_and_plan() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
            .unwrap();

        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Created);
        assert_eq!(pkg.current_city, "Austin");
        assert_eq!(pkg.plan, ["Austin", "Dallas", "Houston"]);
        assert_eq!(pkg.history.len(), 1);
        assert_eq!(pkg.history[0].label, "Austin");
        assert_eq!(pkg.history[0].at, helpers::SIM_START);
        assert_eq!(pkg.ticks_waited, 0);
        assert_eq!(pkg.attempts, 0);
        assert_eq!(pkg.rider, None);
        assert!((pkg.price - 27.4).abs() < 1e-9);
        // Creation is persisted immediately.
        assert_eq!(store.writes.len(), 1);
        assert_eq!(store.last().id, id);
    }

    #[test]
    fn unreachable_destination_leaves_plan_empty() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        let mut intake = helpers::intake(ServiceClass::Normal, 1.0);
        intake.dest_city = "ElPaso".into();
        let id = sched.create_package(intake, &graph, &mut store).unwrap();

        assert!(sched.package(id).unwrap().plan.is_empty());
    }

    #[test]
    fn ids_are_sequential() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        let a = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        let b = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        assert_eq!(a.0 + 1, b.0);
    }
}

// ── Tick movement ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use courier_core::{PackageStatus, ServiceClass, Tick};

    use super::helpers::{self, RecordingStore};
    use crate::TickEvent;

    #[test]
    fn overnight_hops_every_tick() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        let events = sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(events, [TickEvent::Moved { package: id, to: "Dallas".into() }]);
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::InTransit);
        assert_eq!(pkg.current_city, "Dallas");
        assert_eq!(pkg.history.len(), 2);
        assert_eq!(pkg.plan, ["Dallas", "Houston"]);
        assert_eq!(pkg.ticks_waited, 0);

        let events = sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(events, [TickEvent::Moved { package: id, to: "Houston".into() }]);
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Arrived);
        assert_eq!(pkg.current_city, "Houston");
        assert_eq!(pkg.history.len(), 3);
        assert!(pkg.plan.is_empty());
    }

    #[test]
    fn created_packages_do_not_move() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
            .unwrap();

        let events = sched.advance_step(&graph, &mut store).unwrap();
        assert!(events.is_empty());
        assert_eq!(sched.package(id).unwrap().status, PackageStatus::Created);
    }

    #[test]
    fn waiting_when_no_route_is_open() {
        let (cities, mut routes, _) = helpers::texas();
        routes.set_blocked("Dallas-Houston", true).unwrap();
        let mut graph = courier_graph::RouteGraph::new();
        graph.rebuild(&cities, &routes);

        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        let events = sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(events, [TickEvent::Waiting { package: id, city: "Austin".into() }]);
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Loaded);
        assert_eq!(pkg.current_city, "Austin");
        assert_eq!(pkg.history.len(), 1);
        assert_eq!(pkg.ticks_waited, 0); // spent, even though nothing moved
    }

    #[test]
    fn rerouting_follows_the_live_graph() {
        let (cities, mut routes, _) = helpers::texas();
        routes.add("Austin", "Houston", 500).unwrap(); // slow direct road
        let mut graph = courier_graph::RouteGraph::new();
        graph.rebuild(&cities, &routes);

        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        // First hop goes via Dallas (195 + 240 beats 500).
        sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(sched.package(id).unwrap().current_city, "Dallas");

        // The last leg closes; next hop backtracks onto the direct road.
        routes.set_blocked("Dallas-Houston", true).unwrap();
        graph.rebuild(&cities, &routes);
        sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(sched.package(id).unwrap().current_city, "Austin");

        sched.advance_step(&graph, &mut store).unwrap();
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.current_city, "Houston");
        assert_eq!(pkg.status, PackageStatus::Arrived);
        let trail: Vec<&str> = pkg.history.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(trail, ["Austin", "Dallas", "Austin", "Houston"]);
    }

    #[test]
    fn package_already_at_destination_arrives_in_place() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        let mut intake = helpers::intake(ServiceClass::Overnight, 1.0);
        intake.dest_city = "Austin".into(); // same as source
        let id = sched.create_package(intake, &graph, &mut store).unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        let events = sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(events, [TickEvent::Arrived { package: id, city: "Austin".into() }]);
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Arrived);
        assert_eq!(pkg.history.len(), 2);
        assert!(pkg.plan.is_empty());
    }

    #[test]
    fn clock_advances_after_processing() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        assert_eq!(sched.clock().current_tick, Tick::ZERO);
        sched.advance_step(&graph, &mut store).unwrap();
        sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(sched.clock().current_tick, Tick(2));

        // A hop is stamped with the tick it happened on, before the advance.
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.history[1].at, helpers::SIM_START);
        assert_eq!(pkg.history[2].at, helpers::SIM_START + i64::from(helpers::TICK_SECS));
    }
}

// ── Cadence ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cadence {
    use courier_core::{PackageStatus, ServiceClass};

    use super::helpers::{self, RecordingStore};

    #[test]
    fn normal_class_moves_every_third_tick() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        assert!(sched.advance_step(&graph, &mut store).unwrap().is_empty());
        assert_eq!(sched.package(id).unwrap().ticks_waited, 1);
        assert!(sched.advance_step(&graph, &mut store).unwrap().is_empty());
        assert_eq!(sched.package(id).unwrap().ticks_waited, 2);

        let events = sched.advance_step(&graph, &mut store).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(sched.package(id).unwrap().current_city, "Dallas");
        assert_eq!(sched.package(id).unwrap().ticks_waited, 0);
    }

    #[test]
    fn twoday_class_moves_every_second_tick() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::TwoDay, 1.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        assert!(sched.advance_step(&graph, &mut store).unwrap().is_empty());
        assert_eq!(sched.advance_step(&graph, &mut store).unwrap().len(), 1);
        assert_eq!(sched.package(id).unwrap().current_city, "Dallas");
    }

    #[test]
    fn accumulator_survives_through_the_store() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();

        sched.advance_step(&graph, &mut store).unwrap();
        // The skip branch still wrote the incremented counter.
        assert_eq!(store.last().ticks_waited, 1);
        assert_eq!(store.last().status, PackageStatus::Loaded);
    }
}

// ── Riders and the last mile ──────────────────────────────────────────────────

#[cfg(test)]
mod riders {
    use courier_core::{PackageId, PackageStatus, ServiceClass};

    use super::helpers::{self, RecordingStore};
    use crate::package::{TRACE_DELIVERED, TRACE_THIRD_FAILURE};
    use crate::{DispatchError, RiderAction, Vehicle};

    /// Create an Overnight package and drive it to `Arrived` in Houston.
    fn arrived_package(
        sched: &mut crate::DeliveryScheduler,
        graph: &courier_graph::RouteGraph,
        store: &mut RecordingStore,
    ) -> PackageId {
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 2.0), graph, store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, store).unwrap();
        sched.advance_step(graph, store).unwrap();
        sched.advance_step(graph, store).unwrap();
        assert_eq!(sched.package(id).unwrap().status, PackageStatus::Arrived);
        id
    }

    #[test]
    fn assignment_takes_only_assignable_packages() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        let ready = arrived_package(&mut sched, &graph, &mut store);
        let fresh = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        let rider = sched.add_rider("dana", "pw", Vehicle::Bike, "Houston");

        let assigned = sched
            .assign_rider(rider, &[ready, fresh, PackageId(99)], &mut store)
            .unwrap();
        assert_eq!(assigned, 1);
        assert_eq!(sched.package(ready).unwrap().status, PackageStatus::OutForDelivery);
        assert_eq!(sched.package(ready).unwrap().rider, Some(rider));
        assert_eq!(sched.package(fresh).unwrap().status, PackageStatus::Created);
        assert_eq!(sched.package(fresh).unwrap().rider, None);
    }

    #[test]
    fn assigning_for_an_unknown_rider_fails() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = arrived_package(&mut sched, &graph, &mut store);

        let err = sched.assign_rider(courier_core::RiderId(7), &[id], &mut store);
        assert!(matches!(err, Err(DispatchError::UnknownRider(_))));
    }

    #[test]
    fn delivery_completes_the_lifecycle() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = arrived_package(&mut sched, &graph, &mut store);
        let rider = sched.add_rider("dana", "pw", Vehicle::Bike, "Houston");
        sched.assign_rider(rider, &[id], &mut store).unwrap();

        sched.rider_action(id, RiderAction::Delivered, &mut store).unwrap();
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Delivered);
        assert_eq!(pkg.history.last().unwrap().label, TRACE_DELIVERED);
        assert!(pkg.plan.is_empty());
    }

    #[test]
    fn three_failures_return_the_package() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = arrived_package(&mut sched, &graph, &mut store);
        let rider = sched.add_rider("dana", "pw", Vehicle::Bus, "Houston");
        sched.assign_rider(rider, &[id], &mut store).unwrap();

        for expected_attempts in 1..=2 {
            sched.rider_action(id, RiderAction::Failed, &mut store).unwrap();
            let pkg = sched.package(id).unwrap();
            assert_eq!(pkg.status, PackageStatus::OutForDelivery);
            assert_eq!(pkg.attempts, expected_attempts);
        }

        sched.rider_action(id, RiderAction::Failed, &mut store).unwrap();
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Returned);
        assert_eq!(pkg.attempts, 3);
        assert_eq!(pkg.history.last().unwrap().label, TRACE_THIRD_FAILURE);
        // The terminal write reached the store, history segment included.
        assert_eq!(store.last().history.last().unwrap().label, TRACE_THIRD_FAILURE);
    }

    #[test]
    fn rider_actions_require_out_for_delivery() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();

        let err = sched.rider_action(id, RiderAction::Delivered, &mut store);
        assert!(matches!(err, Err(DispatchError::InvalidTransition { .. })));
    }

    #[test]
    fn packages_for_rider_lists_active_assignments() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let first = arrived_package(&mut sched, &graph, &mut store);
        let second = arrived_package(&mut sched, &graph, &mut store);
        let rider = sched.add_rider("dana", "pw", Vehicle::Bike, "Houston");
        sched.assign_rider(rider, &[first, second], &mut store).unwrap();

        assert_eq!(sched.packages_for_rider(rider).len(), 2);

        sched.rider_action(first, RiderAction::Delivered, &mut store).unwrap();
        let remaining = sched.packages_for_rider(rider);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
    }

    #[test]
    fn roster_lookups() {
        let mut sched = helpers::scheduler();
        let dana = sched.add_rider("dana", "pw-1", Vehicle::Bike, "Houston");
        let eli = sched.add_rider("eli", "pw-2", Vehicle::Bus, "Dallas");

        assert_eq!(sched.rider(dana).unwrap().username, "dana");
        assert_eq!(sched.roster().by_username("eli").unwrap().id, eli);
        assert_eq!(sched.riders_for_city("Houston").len(), 1);
        assert!(sched.riders_for_city("Austin").is_empty());
    }
}

// ── Manual transitions ────────────────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use courier_core::{PackageId, PackageStatus, ServiceClass};

    use super::helpers::{self, RecordingStore};
    use crate::package::TRACE_RETURNED;
    use crate::DispatchError;

    #[test]
    fn terminal_states_refuse_updates() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Returned, &mut store).unwrap();

        let err = sched.update_status(id, PackageStatus::Loaded, &mut store);
        assert!(matches!(err, Err(DispatchError::InvalidTransition { .. })));
    }

    #[test]
    fn manual_return_records_history() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 1.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();
        sched.advance_step(&graph, &mut store).unwrap(); // now InTransit at Dallas

        sched.update_status(id, PackageStatus::Returned, &mut store).unwrap();
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Returned);
        assert_eq!(pkg.history.last().unwrap().label, TRACE_RETURNED);
        assert!(pkg.plan.is_empty());
    }

    #[test]
    fn plain_updates_touch_only_the_status() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();

        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();
        let pkg = sched.package(id).unwrap();
        assert_eq!(pkg.status, PackageStatus::Loaded);
        assert_eq!(pkg.history.len(), 1);
        assert_eq!(pkg.plan, ["Austin", "Dallas", "Houston"]);
    }

    #[test]
    fn unknown_package_is_reported() {
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let err = sched.update_status(PackageId(99), PackageStatus::Loaded, &mut store);
        assert!(matches!(err, Err(DispatchError::UnknownPackage(PackageId(99)))));
    }
}

// ── Stats and views ───────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use courier_core::{PackageStatus, ServiceClass};

    use super::helpers::{self, RecordingStore};
    use crate::{RiderAction, Vehicle};

    #[test]
    fn empty_scheduler_reports_zero() {
        let sched = helpers::scheduler();
        let stats = sched.stats();
        assert_eq!(stats.revenue, 0.0);
        assert_eq!(stats.delivered + stats.in_transit + stats.failed, 0);
    }

    #[test]
    fn folds_every_status_bucket() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        // One of each: delivered, in transit, out for delivery, returned,
        // still created.
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(
                sched
                    .create_package(helpers::intake(ServiceClass::Overnight, 2.0), &graph, &mut store)
                    .unwrap(),
            );
        }
        let rider = sched.add_rider("dana", "pw", Vehicle::Bike, "Houston");

        for &id in &ids[0..2] {
            sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();
            sched.advance_step(&graph, &mut store).unwrap();
            sched.advance_step(&graph, &mut store).unwrap();
        }
        sched.assign_rider(rider, &ids[0..2], &mut store).unwrap();
        sched.rider_action(ids[0], RiderAction::Delivered, &mut store).unwrap();

        sched.update_status(ids[2], PackageStatus::Loaded, &mut store).unwrap();
        sched.advance_step(&graph, &mut store).unwrap(); // ids[2] now InTransit

        sched.update_status(ids[3], PackageStatus::Returned, &mut store).unwrap();

        let stats = sched.stats();
        assert!((stats.revenue - 5.0 * 27.4).abs() < 1e-6);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.in_transit, 2); // one InTransit + one OutForDelivery
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn city_view_matches_source_current_and_destination() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();
        let id = sched
            .create_package(helpers::intake(ServiceClass::Overnight, 1.0), &graph, &mut store)
            .unwrap();
        sched.update_status(id, PackageStatus::Loaded, &mut store).unwrap();
        sched.advance_step(&graph, &mut store).unwrap(); // now at Dallas

        for city in ["Austin", "Dallas", "Houston"] {
            assert_eq!(sched.packages_for_city(city).len(), 1, "missing from {city}");
        }
        assert!(sched.packages_for_city("ElPaso").is_empty());
    }
}

// ── Hydration ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hydration {
    use courier_core::{PackageId, RiderId, ServiceClass};

    use super::helpers::{self, RecordingStore};
    use crate::rider::Rider;
    use crate::Vehicle;

    #[test]
    fn hydrated_ids_stay_sorted_and_reserved() {
        let (_, _, graph) = helpers::texas();
        let mut sched = helpers::scheduler();
        let mut store = RecordingStore::default();

        sched.hydrate_package(helpers::bare_package(7));
        sched.hydrate_package(helpers::bare_package(3));

        let ids: Vec<PackageId> = sched.packages().iter().map(|p| p.id).collect();
        assert_eq!(ids, [PackageId(3), PackageId(7)]);

        // Fresh creation continues after the highest hydrated id.
        let next = sched
            .create_package(helpers::intake(ServiceClass::Normal, 1.0), &graph, &mut store)
            .unwrap();
        assert_eq!(next, PackageId(8));
    }

    #[test]
    fn rehydrating_a_package_replaces_it() {
        let mut sched = helpers::scheduler();
        let mut replacement = helpers::bare_package(3);
        replacement.receiver = "Carol".into();

        sched.hydrate_package(helpers::bare_package(3));
        sched.hydrate_package(replacement);

        assert_eq!(sched.packages().len(), 1);
        assert_eq!(sched.package(PackageId(3)).unwrap().receiver, "Carol");
    }

    #[test]
    fn rider_ids_continue_after_hydration() {
        let mut sched = helpers::scheduler();
        sched.hydrate_rider(Rider {
            id:       RiderId(4),
            username: "dana".into(),
            secret:   "pw".into(),
            vehicle:  Vehicle::Bike,
            city:     "Houston".into(),
        });

        let next = sched.add_rider("eli", "pw", Vehicle::Bus, "Dallas");
        assert_eq!(next, RiderId(5));
    }
}
