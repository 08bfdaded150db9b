//! Brent Hash Table - fixed-capacity open addressing with double hashing
//!
//! Core library providing:
//! - Three-state slots (empty, tombstone, occupied)
//! - Double-hashing probe arithmetic over integer keys
//! - Plain insertion and Brent's relocating insertion
//! - Probe-length statistics and content digests for comparing tables

pub mod capacity;
pub mod digest;
pub mod error;
pub mod probe;
pub mod slot;
pub mod table;

pub use capacity::DEFAULT_CAPACITY;
pub use digest::ContentDigest;
pub use error::{Result, TableError};
pub use probe::ProbeSequence;
pub use slot::{Key, Slot};
pub use table::{Table, TableStats};
