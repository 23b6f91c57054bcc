//! CSV tick log.
//!
//! Creates two files in the configured output directory:
//! - `tick_events.csv`
//! - `package_snapshots.csv`
//!
//! The log is append-only diagnostics, not a load source; the database is
//! the single source of truth on restart.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use courier_core::Tick;
use courier_dispatch::{Package, TickEvent};

use crate::error::DepotResult;

/// Writes per-tick movement events and package snapshots to two CSV files.
pub struct CsvTickLog {
    events:    Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvTickLog {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> DepotResult<Self> {
        let mut events = Writer::from_path(dir.join("tick_events.csv"))?;
        events.write_record(["tick", "package_id", "event", "city"])?;

        let mut snapshots = Writer::from_path(dir.join("package_snapshots.csv"))?;
        snapshots.write_record(["tick", "package_id", "status", "current_city", "attempts"])?;

        Ok(Self {
            events,
            snapshots,
            finished: false,
        })
    }

    /// Append one row per event produced by a tick.
    pub fn log_tick(&mut self, tick: Tick, events: &[TickEvent]) -> DepotResult<()> {
        for event in events {
            self.events.write_record(&[
                tick.0.to_string(),
                event.package_id().0.to_string(),
                event.label().to_string(),
                event.city().to_string(),
            ])?;
        }
        Ok(())
    }

    /// Append one row per package, recording where everything sits right now.
    pub fn snapshot_packages(&mut self, tick: Tick, packages: &[Package]) -> DepotResult<()> {
        for package in packages {
            self.snapshots.write_record(&[
                tick.0.to_string(),
                package.id.0.to_string(),
                package.status.as_str().to_string(),
                package.current_city.clone(),
                package.attempts.to_string(),
            ])?;
        }
        Ok(())
    }

    /// Flush both files.  Safe to call more than once.
    pub fn finish(&mut self) -> DepotResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
