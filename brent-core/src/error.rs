//! Error type for table operations

use thiserror::Error;

use crate::slot::Key;

/// Failure of a table operation
///
/// Every variant leaves the table exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Construction with a capacity that leaves the stride undefined
    #[error("capacity must be greater than 2, got {capacity}")]
    InvalidCapacity { capacity: usize },

    /// The key already occupies a slot
    #[error("key {key} is already present")]
    DuplicateKey { key: Key },

    /// Every slot on the key's probe sequence is occupied by another key
    #[error("no free slot reachable for key {key}")]
    TableFull { key: Key },

    /// The key is not in the table
    #[error("key {key} not found")]
    NotFound { key: Key },
}

pub type Result<T> = std::result::Result<T, TableError>;
