//! Errors reported by this crate.

use thiserror::Error;

use crate::entity::EntityId;
use crate::entity::ValueId;

/// Errors reported by tables, reactive collections and entities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested capacity is larger than the largest tabulated prime.
    ///
    /// There is no larger capacity to move to, so this is unrecoverable for
    /// the table that hit it.
    #[error("capacity overflow: requested {requested}, largest supported capacity is {max}")]
    CapacityOverflow {
        /// The capacity that was asked for.
        requested: usize,
        /// The largest capacity the prime table can provide.
        max: usize,
    },

    /// An index-based access fell outside the sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index that was used.
        index: usize,
        /// The length of the sequence at the time of the access.
        len: usize,
    },

    /// No value is stored under the key.
    #[error("value {0} not found")]
    ValueNotFound(ValueId),

    /// A value exists under the key but holds a different type.
    #[error("type mismatch for value {key}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The value key.
        key: ValueId,
        /// The type that was requested.
        expected: &'static str,
        /// The type actually stored.
        found: &'static str,
    },

    /// The world holds no entity with this id.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// Every entity id has been handed out.
    #[error("entity ids exhausted")]
    EntityIdsExhausted,

    /// The entity was disposed and can no longer change lifecycle state.
    #[error("entity {0} is disposed")]
    EntityDisposed(EntityId),
}

/// Result type for fallible operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;
