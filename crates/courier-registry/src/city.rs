//! City registry: the system of record for network nodes.

use courier_core::{CityId, LayoutPoint};

use crate::error::{RegistryError, RegistryResult};
use crate::table::KeyedTable;

/// One registered city.  The registry key is `name`; the record repeats it so
/// snapshots are self-contained.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityRecord {
    pub id: CityId,
    pub name: String,
    /// Login credential consumed by the (out-of-scope) operator shell.
    pub secret: String,
    /// Canvas position.  `LayoutPoint::ORIGIN` until a rebuild assigns one.
    pub pos: LayoutPoint,
}

/// Fixed-capacity registry of cities, keyed by name.
pub struct CityRegistry {
    table: KeyedTable<CityRecord>,
}

impl CityRegistry {
    pub fn new() -> Self {
        Self { table: KeyedTable::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: KeyedTable::with_capacity(capacity) }
    }

    /// Register a new city and return its id.
    ///
    /// Ids are the active count at insertion time, so they are dense while
    /// cities are only added.  A remove followed by an add reuses the numeric
    /// value for a different city; callers that need stable identity key on
    /// the name.
    pub fn add(&mut self, name: &str, secret: &str) -> RegistryResult<CityId> {
        if self.table.contains(name) {
            return Err(RegistryError::DuplicateKey(name.to_owned()));
        }
        let id = CityId(self.table.active_count() as u32);
        let record = CityRecord {
            id,
            name: name.to_owned(),
            secret: secret.to_owned(),
            pos: LayoutPoint::ORIGIN,
        };
        self.table.insert(name, record)?;
        Ok(id)
    }

    /// Insert or replace a record wholesale (the store-hydration path).
    ///
    /// A record carrying the unset-position sentinel does not clobber a
    /// position the registry already holds for that name, so reloading a
    /// stale snapshot keeps the layout stable.
    pub fn hydrate(&mut self, mut record: CityRecord) -> RegistryResult<()> {
        if record.pos.is_unset() {
            if let Some(existing) = self.table.get(&record.name) {
                record.pos = existing.pos;
            }
        }
        let name = record.name.clone();
        self.table.insert(&name, record)
    }

    pub fn get(&self, name: &str) -> Option<&CityRecord> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    pub fn id(&self, name: &str) -> Option<CityId> {
        self.table.get(name).map(|record| record.id)
    }

    /// Credential lookup for the operator shell.
    pub fn secret(&self, name: &str) -> Option<&str> {
        self.table.get(name).map(|record| record.secret.as_str())
    }

    /// Move a city on the canvas (drag-and-drop, or layout write-back).
    pub fn set_position(&mut self, name: &str, pos: LayoutPoint) -> RegistryResult<()> {
        self.table.update_with(name, |record| record.pos = pos)
    }

    /// Remove a city, leaving a tombstone in the table.
    pub fn remove(&mut self, name: &str) -> RegistryResult<()> {
        self.table.remove(name)
    }

    /// Live records in physical slot order.
    pub fn iter(&self) -> impl Iterator<Item = &CityRecord> + '_ {
        self.table.iter_active().map(|(_, record)| record)
    }

    /// Clone of every live record, for snapshot saves.
    pub fn snapshot(&self) -> Vec<CityRecord> {
        self.iter().cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.table.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
