//! Error taxonomy for variable table operations.
//!
//! Every failure is local to the call that raised it: the table is left in
//! the state it had before the call, and nothing here is process-fatal.

use std::error::Error;
use std::fmt;

/// Errors from operations on a variable table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The slot index is outside `[0, capacity)`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of slots in the table.
        capacity: usize,
    },
    /// The allocator could not satisfy the request, or the table's
    /// memory limit would be exceeded. The slot stays uninitialized.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
    /// `create_variable` on a slot that already owns an allocation while
    /// the overwrite policy rejects overwrites.
    AlreadyInitialized {
        /// The occupied slot.
        index: usize,
    },
    /// Strict release of a handle whose allocation was already released.
    DoubleFree {
        /// The slot the handle pointed at.
        index: usize,
    },
    /// Access through a stale handle, or to an uninitialized slot.
    UseAfterFree {
        /// The slot that was accessed.
        index: usize,
    },
    /// A typed access needs more bytes than the slot owns.
    BufferTooSmall {
        /// The slot that was accessed.
        index: usize,
        /// Bytes the access needs.
        required: usize,
        /// Bytes the slot owns.
        actual: usize,
    },
}

impl TableError {
    /// The slot index involved, if the error concerns a single slot.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::IndexOutOfRange { index, .. }
            | Self::AlreadyInitialized { index }
            | Self::DoubleFree { index }
            | Self::UseAfterFree { index }
            | Self::BufferTooSmall { index, .. } => Some(*index),
            Self::OutOfMemory { .. } => None,
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "index {index} out of range for table of {capacity} slots")
            }
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: could not allocate {requested} bytes")
            }
            Self::AlreadyInitialized { index } => {
                write!(f, "slot {index} is already initialized")
            }
            Self::DoubleFree { index } => write!(f, "slot {index} was already freed"),
            Self::UseAfterFree { index } => {
                write!(f, "slot {index} is not initialized (use after free)")
            }
            Self::BufferTooSmall {
                index,
                required,
                actual,
            } => {
                write!(
                    f,
                    "slot {index} holds {actual} bytes, access needs {required}"
                )
            }
        }
    }
}

impl Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_index_and_capacity() {
        let e = TableError::IndexOutOfRange {
            index: 300,
            capacity: 256,
        };
        assert_eq!(e.to_string(), "index 300 out of range for table of 256 slots");
    }

    #[test]
    fn index_accessor() {
        assert_eq!(TableError::DoubleFree { index: 4 }.index(), Some(4));
        assert_eq!(TableError::OutOfMemory { requested: 1 }.index(), None);
    }

    #[test]
    fn buffer_too_small_display() {
        let e = TableError::BufferTooSmall {
            index: 2,
            required: 4,
            actual: 1,
        };
        assert_eq!(e.to_string(), "slot 2 holds 1 bytes, access needs 4");
    }
}
