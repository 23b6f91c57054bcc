//! smalltown — smallest example for the courier delivery network.
//!
//! Seeds five Texas cities, six shipments, and four riders, then runs the
//! delivery clock for half a day while a highway closes and reopens mid-run.
//! State lives in a SQLite file, so a second run picks up whatever the first
//! one left in flight.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use courier_core::{PackageId, PackageStatus, ServiceClass, SimClock, Tick};
use courier_dispatch::{PackageIntake, RiderAction, Vehicle};
use courier_hub::CourierHub;
use courier_store::{CsvTickLog, SqliteStore};

// ── Constants ─────────────────────────────────────────────────────────────────

const START_UNIX_SECS:    i64  = 1_700_000_000; // fixed reference Monday 00:00 UTC
const TICK_DURATION_SECS: u32  = 3_600;         // 1 tick = 1 hour
const TICKS:              u64  = 12;
const BLOCK_AT:           u64  = 3;             // close Austin-Dallas at this tick
const REOPEN_AT:          u64  = 7;
const OUT_DIR:            &str = "output/smalltown";

// ── Seed data ─────────────────────────────────────────────────────────────────

const CITIES: [(&str, &str); 5] = [
    ("Austin",      "violet-armadillo"),
    ("Dallas",      "amber-pecan"),
    ("Houston",     "teal-bayou"),
    ("San Antonio", "coral-mission"),
    ("El Paso",     "sage-mesa"),
];

// Road distances in miles, one row per undirected corridor.
const ROUTES: [(&str, &str, u32); 6] = [
    ("Austin",      "Dallas",      195),
    ("Dallas",      "Houston",     239),
    ("Austin",      "Houston",     165),
    ("Austin",      "San Antonio",  80),
    ("San Antonio", "Houston",     197),
    ("Austin",      "El Paso",     576),
];

const RIDERS: [(&str, Vehicle, &str); 4] = [
    ("casey", Vehicle::Bike, "Houston"),
    ("drew",  Vehicle::Bus,  "Dallas"),
    ("val",   Vehicle::Bike, "San Antonio"),
    ("kai",   Vehicle::Bus,  "El Paso"),
];

// sender, receiver, address, from, to, service class, weight (kg).
const SHIPMENTS: [(&str, &str, &str, &str, &str, ServiceClass, f64); 6] = [
    ("Ann",   "Bob",  "12 Elm St",      "Austin",      "Houston", ServiceClass::Overnight, 2.0),
    ("Cal",   "Dee",  "4 Oak Ave",      "Dallas",      "San Antonio", ServiceClass::TwoDay, 5.5),
    ("Eve",   "Flo",  "9 Pine Rd",      "Houston",     "El Paso", ServiceClass::Normal,    1.2),
    ("Gus",   "Hal",  "77 Cedar Ln",    "El Paso",     "Dallas",  ServiceClass::Overnight, 0.8),
    ("Ivy",   "Jo",   "310 Maple Dr",   "San Antonio", "Dallas",  ServiceClass::TwoDay,    3.0),
    ("Kim",   "Lou",  "5 Birch Ct",     "Austin",      "Dallas",  ServiceClass::Normal,    4.4),
];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("=== smalltown — courier delivery network ===");
    println!("Cities: {}  |  Ticks: {TICKS}  |  1 tick = 1 h", CITIES.len());
    println!();

    // 1. Open (or create) the durable network.
    std::fs::create_dir_all(OUT_DIR)?;
    let store = SqliteStore::open(&Path::new(OUT_DIR).join("network.db"))?;
    let hub = CourierHub::open_with_clock(
        store,
        SimClock::new(START_UNIX_SECS, TICK_DURATION_SECS),
    )?;

    // 2. Seed the map, riders, and shipments on a fresh database only; a
    //    rerun keeps ticking the network the previous run left behind.
    let fresh = hub.cities().is_empty();
    let mut failing: Option<PackageId> = None;
    if fresh {
        for (name, secret) in CITIES {
            hub.add_city(name, secret)?;
        }
        for (a, b, distance) in ROUTES {
            hub.add_route(a, b, distance)?;
        }
        for (username, vehicle, city) in RIDERS {
            hub.add_rider(username, "hub-pass", vehicle, city)?;
        }
        for (sender, receiver, address, from, to, service, weight) in SHIPMENTS {
            let id = hub.create_package(PackageIntake {
                sender:      sender.into(),
                receiver:    receiver.into(),
                address:     address.into(),
                source_city: from.into(),
                dest_city:   to.into(),
                service,
                weight_kg:   weight,
            })?;
            hub.update_package_status(id, PackageStatus::Loaded)?;
            failing = Some(id); // the last shipment draws the short straw below
        }
        println!(
            "Seeded {} cities, {} routes, {} riders, {} packages",
            CITIES.len(),
            ROUTES.len(),
            RIDERS.len(),
            SHIPMENTS.len()
        );
    } else {
        println!(
            "Existing network found: {} cities, {} packages",
            hub.cities().len(),
            hub.packages().len()
        );
    }
    println!();

    // 3. CSV tick log for offline analysis.
    let mut log = CsvTickLog::new(Path::new(OUT_DIR))?;

    // 4. Run the clock; close the Dallas highway partway through so traffic
    //    reroutes via Houston.
    for _ in 0..TICKS {
        let now = hub.current_tick();
        if now == Tick(BLOCK_AT) {
            hub.set_route_blocked("Austin-Dallas", true)?;
            println!("{now}: Austin-Dallas closed for maintenance");
        }
        if now == Tick(REOPEN_AT) {
            hub.set_route_blocked("Austin-Dallas", false)?;
            println!("{now}: Austin-Dallas reopened");
        }

        let events = hub.advance_tick()?;
        log.log_tick(now, &events)?;
        log.snapshot_packages(now, &hub.packages())?;
        for event in &events {
            println!("{now}: {event}");
        }
    }
    println!();

    // 5. Last mile: each city's first rider takes whatever arrived there.
    for record in hub.cities() {
        let Some(rider) = hub.riders_for_city(&record.name).into_iter().next() else {
            continue;
        };
        let arrived: Vec<PackageId> = hub
            .packages_for_city(&record.name)
            .into_iter()
            .filter(|p| p.status == PackageStatus::Arrived && p.current_city == record.name)
            .map(|p| p.id)
            .collect();
        if arrived.is_empty() {
            continue;
        }
        let taken = hub.assign_rider(rider.id, &arrived)?;
        println!("{} takes {taken} package(s) in {}", rider.username, record.name);

        for package in hub.packages_for_rider(rider.id) {
            if Some(package.id) == failing {
                // Nobody home, three times in a row.
                for _ in 0..3 {
                    hub.rider_action(package.id, RiderAction::Failed)?;
                }
            } else {
                hub.rider_action(package.id, RiderAction::Delivered)?;
            }
        }
    }
    println!();

    // 6. Final package table.
    println!("{:<14} {:<18} {:<14} {:>8}", "Package", "Status", "City", "Price");
    println!("{}", "-".repeat(58));
    for package in hub.packages() {
        println!(
            "{:<14} {:<18} {:<14} {:>8.2}",
            package.id.to_string(),
            package.status.to_string(),
            package.current_city,
            package.price,
        );
    }
    println!();
    println!("{}", hub.stats());

    // 7. Artifacts: the drawable map as JSON plus the two CSV logs.
    let map = hub.map_snapshot();
    std::fs::write(
        Path::new(OUT_DIR).join("map.json"),
        serde_json::to_string_pretty(&map)?,
    )?;
    log.finish()?;
    println!();
    println!("Artifacts in {OUT_DIR}/: network.db, map.json, tick_events.csv, package_snapshots.csv");

    Ok(())
}
