//! SQLite backend.
//!
//! One database file holds the whole network: `cities`, `routes`, `riders`,
//! and `packages`.  Snapshot saves run inside a transaction with a cached
//! statement; package upserts are single `INSERT OR REPLACE` rows keyed by
//! package id.

use std::path::Path;

use rusqlite::{Connection, Row};

use courier_core::{CityId, LayoutPoint, PackageId, PackageStatus, RiderId, ServiceClass};
use courier_dispatch::{Package, PackageStore, Rider, StoreError, Vehicle};
use courier_registry::{CityRecord, RouteRecord};

use crate::codec::{encode_history, encode_plan, parse_history, parse_plan};
use crate::depot::DepotStore;
use crate::error::{DepotError, DepotResult};

/// A [`DepotStore`] backed by a single SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> DepotResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// An anonymous in-memory database; state lives as long as the store.
    pub fn open_in_memory() -> DepotResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> DepotResult<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS cities (
                 name   TEXT PRIMARY KEY,
                 id     INTEGER NOT NULL,
                 secret TEXT NOT NULL,
                 x      REAL NOT NULL,
                 y      REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS routes (
                 key      TEXT PRIMARY KEY,
                 distance INTEGER NOT NULL,
                 blocked  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS riders (
                 id       INTEGER PRIMARY KEY,
                 username TEXT NOT NULL,
                 secret   TEXT NOT NULL,
                 vehicle  TEXT NOT NULL,
                 city     TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS packages (
                 id           INTEGER PRIMARY KEY,
                 sender       TEXT NOT NULL,
                 receiver     TEXT NOT NULL,
                 address      TEXT NOT NULL,
                 source_city  TEXT NOT NULL,
                 dest_city    TEXT NOT NULL,
                 current_city TEXT NOT NULL,
                 service      TEXT NOT NULL,
                 weight_kg    REAL NOT NULL,
                 status       TEXT NOT NULL,
                 ticks_waited INTEGER NOT NULL,
                 attempts     INTEGER NOT NULL,
                 rider_id     INTEGER,
                 price        REAL NOT NULL,
                 history      TEXT NOT NULL,
                 plan         TEXT NOT NULL
             );",
        )?;
        Ok(Self { conn })
    }

    /// Fold the WAL back into the main database file.
    pub fn checkpoint(&self) -> DepotResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }

    fn put_package(&mut self, package: &Package) -> DepotResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR REPLACE INTO packages \
             (id, sender, receiver, address, source_city, dest_city, current_city, \
              service, weight_kg, status, ticks_waited, attempts, rider_id, price, \
              history, plan) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )?;
        stmt.execute(rusqlite::params![
            i64::from(package.id.0),
            package.sender,
            package.receiver,
            package.address,
            package.source_city,
            package.dest_city,
            package.current_city,
            package.service.as_str(),
            package.weight_kg,
            package.status.as_str(),
            i64::from(package.ticks_waited),
            i64::from(package.attempts),
            package.rider.map(|r| i64::from(r.0)),
            package.price,
            encode_history(&package.history),
            encode_plan(&package.plan),
        ])?;
        Ok(())
    }
}

fn package_from_row(row: &Row<'_>) -> DepotResult<Package> {
    let service_label: String = row.get(7)?;
    let status_label: String = row.get(9)?;
    let history_column: String = row.get(14)?;
    let plan_column: String = row.get(15)?;

    Ok(Package {
        id:           PackageId(row.get::<_, i64>(0)? as u32),
        sender:       row.get(1)?,
        receiver:     row.get(2)?,
        address:      row.get(3)?,
        source_city:  row.get(4)?,
        dest_city:    row.get(5)?,
        current_city: row.get(6)?,
        service: ServiceClass::from_name(&service_label)
            .ok_or_else(|| DepotError::Corrupt(format!("unknown service class {service_label:?}")))?,
        weight_kg: row.get(8)?,
        status: PackageStatus::from_name(&status_label)
            .ok_or_else(|| DepotError::Corrupt(format!("unknown package status {status_label:?}")))?,
        ticks_waited: row.get::<_, i64>(10)? as u32,
        attempts:     row.get::<_, i64>(11)? as u32,
        rider:        row.get::<_, Option<i64>>(12)?.map(|id| RiderId(id as u32)),
        price:        row.get(13)?,
        history:      parse_history(&history_column)?,
        plan:         parse_plan(&plan_column),
    })
}

impl PackageStore for SqliteStore {
    fn upsert_package(&mut self, package: &Package) -> Result<(), StoreError> {
        Ok(self.put_package(package)?)
    }
}

impl DepotStore for SqliteStore {
    fn load_cities(&mut self) -> DepotResult<Vec<CityRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name, id, secret, x, y FROM cities ORDER BY id")?;
        let records = stmt.query_map([], |row| {
            Ok(CityRecord {
                id:     CityId(row.get::<_, i64>(1)? as u32),
                name:   row.get(0)?,
                secret: row.get(2)?,
                pos: LayoutPoint::new(
                    row.get::<_, f64>(3)? as f32,
                    row.get::<_, f64>(4)? as f32,
                ),
            })
        })?;
        Ok(records.collect::<Result<Vec<_>, _>>()?)
    }

    fn save_cities(&mut self, snapshot: &[CityRecord]) -> DepotResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM cities", [])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO cities (name, id, secret, x, y) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in snapshot {
                stmt.execute(rusqlite::params![
                    record.name,
                    i64::from(record.id.0),
                    record.secret,
                    f64::from(record.pos.x),
                    f64::from(record.pos.y),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_routes(&mut self) -> DepotResult<Vec<RouteRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT key, distance, blocked FROM routes ORDER BY key")?;
        let records = stmt.query_map([], |row| {
            Ok(RouteRecord {
                key:      row.get(0)?,
                distance: row.get::<_, i64>(1)? as u32,
                blocked:  row.get::<_, i64>(2)? != 0,
            })
        })?;
        Ok(records.collect::<Result<Vec<_>, _>>()?)
    }

    fn save_routes(&mut self, snapshot: &[RouteRecord]) -> DepotResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM routes", [])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO routes (key, distance, blocked) VALUES (?1, ?2, ?3)",
            )?;
            for record in snapshot {
                stmt.execute(rusqlite::params![
                    record.key,
                    i64::from(record.distance),
                    record.blocked as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_riders(&mut self) -> DepotResult<Vec<Rider>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, username, secret, vehicle, city FROM riders ORDER BY id")?;
        let mut rows = stmt.query([])?;
        let mut riders = Vec::new();
        while let Some(row) = rows.next()? {
            let vehicle_label: String = row.get(3)?;
            riders.push(Rider {
                id:       RiderId(row.get::<_, i64>(0)? as u32),
                username: row.get(1)?,
                secret:   row.get(2)?,
                vehicle: Vehicle::from_name(&vehicle_label)
                    .ok_or_else(|| DepotError::Corrupt(format!("unknown vehicle {vehicle_label:?}")))?,
                city: row.get(4)?,
            });
        }
        Ok(riders)
    }

    fn save_riders(&mut self, snapshot: &[Rider]) -> DepotResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM riders", [])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO riders (id, username, secret, vehicle, city) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for rider in snapshot {
                stmt.execute(rusqlite::params![
                    i64::from(rider.id.0),
                    rider.username,
                    rider.secret,
                    rider.vehicle.as_str(),
                    rider.city,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_packages(&mut self) -> DepotResult<Vec<Package>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, sender, receiver, address, source_city, dest_city, current_city, \
             service, weight_kg, status, ticks_waited, attempts, rider_id, price, \
             history, plan FROM packages ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut packages = Vec::new();
        while let Some(row) = rows.next()? {
            packages.push(package_from_row(row)?);
        }
        Ok(packages)
    }
}
