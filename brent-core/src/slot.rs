//! Storage cell of the table
//!
//! A slot is one of:
//! - `Empty`: never held an entry, terminates lookups
//! - `Tombstone`: held an entry that was deleted, lookups continue past it
//! - `Occupied`: holds a live key/value pair
//!
//! Slots never return to `Empty` once used.

use std::fmt;
use std::mem;

/// Integer key type stored in the table
pub type Key = i64;

/// One position of the table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot<V> {
    #[default]
    Empty,
    Tombstone,
    Occupied { key: Key, value: V },
}

impl<V> Slot<V> {
    /// Available for insertion (Empty or Tombstone)
    #[inline(always)]
    pub fn is_free(&self) -> bool {
        !self.is_occupied()
    }

    /// Never used since construction
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline(always)]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline(always)]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    /// Key of an occupied slot
    pub fn key(&self) -> Option<Key> {
        match self {
            Slot::Occupied { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Occupied with exactly this key
    #[inline(always)]
    pub fn holds(&self, key: Key) -> bool {
        self.key() == Some(key)
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Store an entry in a free slot
    ///
    /// Returns the entry back if the slot is already occupied.
    pub(crate) fn occupy(&mut self, key: Key, value: V) -> Result<(), (Key, V)> {
        if self.is_occupied() {
            return Err((key, value));
        }
        *self = Slot::Occupied { key, value };
        Ok(())
    }

    /// Turn an occupied slot into a tombstone, handing back its entry
    ///
    /// Empty and tombstone slots are left untouched.
    pub(crate) fn vacate(&mut self) -> Option<(Key, V)> {
        if !self.is_occupied() {
            return None;
        }
        match mem::replace(self, Slot::Tombstone) {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

/// An occupied slot renders as its key
impl<V> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "empty"),
            Slot::Tombstone => write!(f, "tombstone"),
            Slot::Occupied { key, .. } => write!(f, "{}", key),
        }
    }
}
