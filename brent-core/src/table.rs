//! Fixed-capacity double-hashing table
//!
//! Provides:
//! - Plain double-hashing insertion
//! - Brent's variant: on collision, move the occupant of the previous probe
//!   slot one step along its own stride when that frees a nearer slot
//! - Tombstone deletion with lookups that stop at the first never-used slot
//! - Probe-length statistics and an order-independent content digest

use log::{debug, trace};

use crate::capacity::{twin_prime_at_least, DEFAULT_CAPACITY};
use crate::digest::ContentDigest;
use crate::error::{Result, TableError};
use crate::probe::ProbeSequence;
use crate::slot::{Key, Slot};

/// Outcome of walking a key's probe sequence
enum Scan {
    /// Key found at `index` on probe attempt `attempt`
    Found { index: usize, attempt: usize },
    /// Key absent; first free slot on the path, if any
    Absent { first_free: Option<usize> },
}

/// Table statistics
#[derive(Clone, Debug, PartialEq)]
pub struct TableStats {
    pub len: usize,
    pub tombstones: usize,
    pub capacity: usize,
    pub load_factor: f64,
    /// Average attempts of a successful lookup, 0.0 if empty
    pub mean_probe_length: f64,
}

/// Open-addressing table mapping integer keys to values
///
/// The capacity is fixed at construction. Operations never resize and
/// never leave the table partially modified on failure.
#[derive(Clone, Debug)]
pub struct Table<V> {
    slots: Vec<Slot<V>>,
    probe: ProbeSequence,
    len: usize,
    tombstones: usize,
}

impl<V> Table<V> {
    /// Create an empty table
    ///
    /// Fails with `InvalidCapacity` when `capacity <= 2`. Every slot is
    /// reachable for every key only if the strides `1..=capacity - 2` are
    /// coprime with `capacity`; a prime capacity guarantees that.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity <= 2 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        Ok(Self::with_slots(capacity))
    }

    /// Create a table whose capacity is the smallest twin prime `>= min`
    pub fn with_min_capacity(min: usize) -> Result<Self> {
        let capacity =
            twin_prime_at_least(min).ok_or(TableError::InvalidCapacity { capacity: min })?;
        Self::new(capacity)
    }

    fn with_slots(capacity: usize) -> Self {
        Table {
            slots: std::iter::repeat_with(|| Slot::Empty).take(capacity).collect(),
            probe: ProbeSequence::new(capacity),
            len: 0,
            tombstones: 0,
        }
    }

    /// Walk `key`'s probe sequence until the key, an empty slot, or the end
    ///
    /// Tombstones are remembered as insertion candidates but do not stop
    /// the walk, so a live copy of the key further along is still found.
    fn scan(&self, key: Key) -> Scan {
        let mut first_free = None;

        for (attempt, index) in self.probe.indices(key).enumerate() {
            match &self.slots[index] {
                Slot::Empty => {
                    return Scan::Absent {
                        first_free: first_free.or(Some(index)),
                    };
                }
                Slot::Tombstone => {
                    first_free.get_or_insert(index);
                }
                Slot::Occupied { key: other, .. } if *other == key => {
                    return Scan::Found { index, attempt };
                }
                Slot::Occupied { .. } => {}
            }
        }

        Scan::Absent { first_free }
    }

    /// Write an entry into a free slot
    fn place(&mut self, index: usize, key: Key, value: V) {
        let slot = &mut self.slots[index];
        if slot.is_tombstone() {
            self.tombstones -= 1;
        }
        let placed = slot.occupy(key, value).is_ok();
        debug_assert!(placed, "slot {} must be free", index);
        if placed {
            self.len += 1;
        }
    }

    /// Insert with plain double hashing
    ///
    /// Returns the slot index the entry landed in: the first free slot on
    /// the key's probe sequence.
    pub fn insert(&mut self, key: Key, value: V) -> Result<usize> {
        match self.scan(key) {
            Scan::Found { .. } => Err(TableError::DuplicateKey { key }),
            Scan::Absent {
                first_free: Some(index),
            } => {
                self.place(index, key, value);
                Ok(index)
            }
            Scan::Absent { first_free: None } => {
                debug!("insert: table full for key {} (len {})", key, self.len);
                Err(TableError::TableFull { key })
            }
        }
    }

    /// Insert with Brent's variant of double hashing
    ///
    /// At each collision after the first attempt, the key sitting in the
    /// previous probe slot is offered one step along its own stride. If
    /// that slot is free the occupant moves there and the new entry takes
    /// the vacated slot. Returns the index the new entry landed in.
    pub fn insert_brent(&mut self, key: Key, value: V) -> Result<usize> {
        if let Scan::Found { .. } = self.scan(key) {
            return Err(TableError::DuplicateKey { key });
        }

        let origin = self.probe.primary(key);
        for i in 0..self.capacity() {
            let index = self.probe.probe(origin, key, i);
            if self.slots[index].is_free() {
                self.place(index, key, value);
                return Ok(index);
            }
            if i == 0 {
                continue;
            }

            let prev = self.probe.probe(origin, key, i - 1);
            if let Some(target) = self.relocation_target(prev) {
                self.relocate_and_place(prev, target, key, value);
                return Ok(prev);
            }
        }

        debug!("insert_brent: table full for key {} (len {})", key, self.len);
        Err(TableError::TableFull { key })
    }

    /// Free slot one stride step past the occupant of `from`, if any
    fn relocation_target(&self, from: usize) -> Option<usize> {
        let occupant = self.slots[from].key()?;
        let target = self.probe.probe(from, occupant, 1);
        self.slots[target].is_free().then_some(target)
    }

    /// Move the occupant of `from` into free `to`, then store the new entry at `from`
    fn relocate_and_place(&mut self, from: usize, to: usize, key: Key, value: V) {
        trace!(
            "insert_brent: moving key {:?} from slot {} to {} for key {}",
            self.slots[from].key(),
            from,
            to,
            key
        );
        // `to` is free, so after the swap `from` holds its Empty/Tombstone
        self.slots.swap(from, to);
        self.place(from, key, value);
    }

    /// Value stored under `key`
    pub fn retrieve(&self, key: Key) -> Option<&V> {
        match self.scan(key) {
            Scan::Found { index, .. } => self.slots[index].value(),
            Scan::Absent { .. } => None,
        }
    }

    /// Mutable value stored under `key`
    pub fn retrieve_mut(&mut self, key: Key) -> Option<&mut V> {
        match self.scan(key) {
            Scan::Found { index, .. } => self.slots[index].value_mut(),
            Scan::Absent { .. } => None,
        }
    }

    /// Delete `key`, leaving a tombstone; returns the freed index
    pub fn delete(&mut self, key: Key) -> Result<usize> {
        let Scan::Found { index, .. } = self.scan(key) else {
            return Err(TableError::NotFound { key });
        };
        if self.slots[index].vacate().is_some() {
            self.len -= 1;
            self.tombstones += 1;
        }
        Ok(index)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.index_of(key).is_some()
    }

    /// Slot index currently holding `key`
    pub fn index_of(&self, key: Key) -> Option<usize> {
        match self.scan(key) {
            Scan::Found { index, .. } => Some(index),
            Scan::Absent { .. } => None,
        }
    }

    /// Attempts a successful lookup of `key` performs (1 = primary slot)
    pub fn probe_length(&self, key: Key) -> Option<usize> {
        match self.scan(key) {
            Scan::Found { attempt, .. } => Some(attempt + 1),
            Scan::Absent { .. } => None,
        }
    }

    /// Slot at `index`, `None` if out of range
    pub fn slot(&self, index: usize) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    /// `index` is in range and available for insertion
    pub fn is_free(&self, index: usize) -> bool {
        self.slot(index).is_some_and(Slot::is_free)
    }

    /// `index` is in range and has never held an entry
    pub fn is_unused(&self, index: usize) -> bool {
        self.slot(index).is_some_and(Slot::is_empty)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of deleted slots not yet reused
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Probe parameters used by this table
    pub fn probe_sequence(&self) -> &ProbeSequence {
        &self.probe
    }

    /// Compute statistics (O(len · capacity) worst case)
    pub fn stats(&self) -> TableStats {
        let total: usize = self
            .slots
            .iter()
            .filter_map(Slot::key)
            .filter_map(|key| self.probe_length(key))
            .sum();

        let mean_probe_length = if self.len == 0 {
            0.0
        } else {
            total as f64 / self.len as f64
        };

        TableStats {
            len: self.len,
            tombstones: self.tombstones,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            mean_probe_length,
        }
    }

    /// Digest of the live entries, independent of their slot positions
    pub fn digest(&self) -> ContentDigest
    where
        V: AsRef<[u8]>,
    {
        ContentDigest::from_hashes(self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some(ContentDigest::hash_entry(*key, value)),
            _ => None,
        }))
    }
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::with_slots(DEFAULT_CAPACITY)
    }
}
