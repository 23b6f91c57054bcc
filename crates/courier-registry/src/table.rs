//! Open-addressing hash table with a fixed slot count.
//!
//! # Design
//!
//! `KeyedTable<T>` stores string-keyed payloads in `capacity` slots and never
//! resizes.  Collisions are resolved by quadratic probing with one formula
//! for every operation:
//!
//! ```text
//! idx(i) = (h + i + i²) mod capacity      for i = 0 .. capacity-1
//! ```
//!
//! Removal writes a tombstone ([`Slot::Deleted`]) rather than emptying the
//! slot, so keys that probed past the removed entry stay reachable.  Inserts
//! recycle the first tombstone seen on their probe path, but only once the
//! probe also proves the key absent by reaching an `Empty` slot.  A chain
//! with no `Empty` slot left is reported as [`TableFull`] even when
//! tombstones were passed.
//!
//! With a prime capacity this probe sequence reaches about half of the slots
//! from any starting index, so `TableFull` can occur before the table is
//! literally full.  That is inherent to the scheme, not a bug; capacity is
//! sized generously relative to the expected city count.
//!
//! [`TableFull`]: crate::RegistryError::TableFull

use crate::error::{RegistryError, RegistryResult};

/// Default slot count for both registries.  Prime, so the quadratic probe
/// cycles through distinct offsets.
pub const DEFAULT_CAPACITY: usize = 97;

// ── Hash seam ─────────────────────────────────────────────────────────────────

/// Maps a key to its home slot.
///
/// Implementations must be pure functions of `(key, capacity)` and must
/// return a value in `0..capacity`; the table re-derives the slot on every
/// operation and stores nothing about it.
pub trait KeyHasher {
    fn slot(&self, key: &str, capacity: usize) -> usize;
}

/// Default hasher: byte-sum of the key modulo capacity.
///
/// Deliberately weak: anagrams collide ("Austin"/"Tusain"), and short ASCII
/// keys cluster in a narrow band.  The registries keep it for its
/// predictability; swap in a stronger [`KeyHasher`] if a deployment ever
/// carries adversarial key sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChecksumHasher;

impl KeyHasher for ChecksumHasher {
    fn slot(&self, key: &str, capacity: usize) -> usize {
        let sum: usize = key.bytes().map(usize::from).sum();
        sum % capacity
    }
}

// ── Slots ─────────────────────────────────────────────────────────────────────

/// One physical slot of the table.
#[derive(Debug, Clone)]
enum Slot<T> {
    /// Never written, or cleared before any write.  Terminates probe chains.
    Empty,
    /// Live record.
    Occupied { key: String, payload: T },
    /// Tombstone: removed record.  Probe chains continue through it.
    Deleted,
}

// ── KeyedTable ────────────────────────────────────────────────────────────────

/// Fixed-capacity open-addressing table mapping `String` keys to `T`.
pub struct KeyedTable<T, H: KeyHasher = ChecksumHasher> {
    slots: Vec<Slot<T>>,
    hasher: H,
    live: usize,
}

impl<T> KeyedTable<T, ChecksumHasher> {
    /// Table with [`DEFAULT_CAPACITY`] slots and the checksum hasher.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Table with `capacity` slots and the checksum hasher.
    ///
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, ChecksumHasher)
    }
}

impl<T, H: KeyHasher> KeyedTable<T, H> {
    /// Table with `capacity` slots and a caller-supplied hasher.
    ///
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        assert!(capacity > 0, "KeyedTable capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self { slots, hasher, live: 0 }
    }

    /// Number of live (Occupied) records.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.live
    }

    /// Total slot count, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// `true` if `key` currently maps to a live record.
    pub fn contains(&self, key: &str) -> bool {
        self.probe_for_key(key).is_some()
    }

    /// Insert `payload` under `key`, or replace the payload in place if the
    /// key is already live (update semantics).
    ///
    /// A new record lands in the first tombstone passed on the probe path if
    /// there was one, otherwise in the `Empty` slot that terminated the
    /// probe.
    pub fn insert(&mut self, key: &str, payload: T) -> RegistryResult<()> {
        let Some(idx) = self.probe_for_insert(key) else {
            return Err(RegistryError::TableFull {
                key: key.to_owned(),
                capacity: self.slots.len(),
            });
        };
        match &mut self.slots[idx] {
            Slot::Occupied { payload: existing, .. } => *existing = payload,
            slot => {
                *slot = Slot::Occupied { key: key.to_owned(), payload };
                self.live += 1;
            }
        }
        Ok(())
    }

    /// Shared reference to the payload under `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.probe_for_key(key).map(|idx| match &self.slots[idx] {
            Slot::Occupied { payload, .. } => payload,
            _ => unreachable!("probe_for_key only returns Occupied slots"),
        })
    }

    /// Mutate the payload under `key` in place.
    pub fn update_with(&mut self, key: &str, f: impl FnOnce(&mut T)) -> RegistryResult<()> {
        let Some(idx) = self.probe_for_key(key) else {
            return Err(RegistryError::KeyNotFound(key.to_owned()));
        };
        match &mut self.slots[idx] {
            Slot::Occupied { payload, .. } => f(payload),
            _ => unreachable!("probe_for_key only returns Occupied slots"),
        }
        Ok(())
    }

    /// Remove the record under `key`, leaving a tombstone in its slot.
    pub fn remove(&mut self, key: &str) -> RegistryResult<()> {
        let Some(idx) = self.probe_for_key(key) else {
            return Err(RegistryError::KeyNotFound(key.to_owned()));
        };
        self.slots[idx] = Slot::Deleted;
        self.live -= 1;
        Ok(())
    }

    /// All live `(key, payload)` pairs in physical slot order.
    ///
    /// The order is stable for an unchanged table but reshuffles as records
    /// come and go; callers must not attach meaning to it.
    pub fn iter_active(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, payload } => Some((key.as_str(), payload)),
            _ => None,
        })
    }

    // ── Probe walks ───────────────────────────────────────────────────────

    /// Walk the probe chain for `key` and return the slot index of its live
    /// record, continuing through tombstones and stopping at `Empty`.
    pub(crate) fn probe_for_key(&self, key: &str) -> Option<usize> {
        let n = self.slots.len();
        let h = self.hasher.slot(key, n);
        for i in 0..n {
            let idx = (h + i + i * i) % n;
            match &self.slots[idx] {
                Slot::Occupied { key: k, .. } if k == key => return Some(idx),
                Slot::Occupied { .. } | Slot::Deleted => {}
                Slot::Empty => return None,
            }
        }
        None
    }

    /// Walk the probe chain for an insert: the index of the matching live
    /// record, or the slot a new record should be written to.  `None` means
    /// the chain has no `Empty` slot and no match, so the table is full for
    /// this key.
    fn probe_for_insert(&self, key: &str) -> Option<usize> {
        let n = self.slots.len();
        let h = self.hasher.slot(key, n);
        let mut recycle: Option<usize> = None;
        for i in 0..n {
            let idx = (h + i + i * i) % n;
            match &self.slots[idx] {
                Slot::Occupied { key: k, .. } if k == key => return Some(idx),
                Slot::Occupied { .. } => {}
                Slot::Deleted => {
                    if recycle.is_none() {
                        recycle = Some(idx);
                    }
                }
                Slot::Empty => return Some(recycle.unwrap_or(idx)),
            }
        }
        None
    }
}

impl<T> Default for KeyedTable<T, ChecksumHasher> {
    fn default() -> Self {
        Self::new()
    }
}
