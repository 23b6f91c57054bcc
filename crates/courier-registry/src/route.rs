//! Route registry: the system of record for inter-city links.
//!
//! A route is undirected and keyed by the `"CityA-CityB"` string its caller
//! registered it under.  The graph layer expands each record into two
//! directed edges at rebuild.

use crate::error::{RegistryError, RegistryResult};
use crate::table::KeyedTable;

/// Build the registry key for a link between two cities, in caller order.
pub fn route_key(a: &str, b: &str) -> String {
    format!("{a}-{b}")
}

/// Split a route key at its first `-` into endpoint names.
///
/// Empty endpoint names are returned as-is (the graph rebuild skips them as
/// unresolvable); a key with no separator at all is malformed.
pub fn split_route_key(key: &str) -> RegistryResult<(&str, &str)> {
    key.split_once('-')
        .ok_or_else(|| RegistryError::MalformedRouteKey(key.to_owned()))
}

/// One registered link.  The registry key is `key`; the record repeats it so
/// snapshots are self-contained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRecord {
    pub key: String,
    /// Positive edge weight.  Zero is accepted but degenerate.
    pub distance: u32,
    /// Live closure flag.  Blocked routes stay registered but are excluded
    /// from routing entirely until unblocked.
    pub blocked: bool,
}

/// Fixed-capacity registry of routes, keyed by `"CityA-CityB"`.
pub struct RouteRegistry {
    table: KeyedTable<RouteRecord>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self { table: KeyedTable::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: KeyedTable::with_capacity(capacity) }
    }

    /// Register a link between `a` and `b`, or update its distance if the
    /// same key is already live.  Re-adding keeps the blocked flag.
    pub fn add(&mut self, a: &str, b: &str, distance: u32) -> RegistryResult<()> {
        let key = route_key(a, b);
        let blocked = self.table.get(&key).is_some_and(|record| record.blocked);
        self.table.insert(&key, RouteRecord { key: key.clone(), distance, blocked })
    }

    /// Insert or replace a record wholesale (the store-hydration path).
    pub fn hydrate(&mut self, record: RouteRecord) -> RegistryResult<()> {
        let key = record.key.clone();
        self.table.insert(&key, record)
    }

    /// Flip the closure flag on an existing route.
    pub fn set_blocked(&mut self, key: &str, blocked: bool) -> RegistryResult<()> {
        self.table.update_with(key, |record| record.blocked = blocked)
    }

    pub fn get(&self, key: &str) -> Option<&RouteRecord> {
        self.table.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table.contains(key)
    }

    /// Remove a route, leaving a tombstone in the table.
    pub fn remove(&mut self, key: &str) -> RegistryResult<()> {
        self.table.remove(key)
    }

    /// Live records in physical slot order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteRecord> + '_ {
        self.table.iter_active().map(|(_, record)| record)
    }

    /// Clone of every live record, for snapshot saves.
    pub fn snapshot(&self) -> Vec<RouteRecord> {
        self.iter().cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.table.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
