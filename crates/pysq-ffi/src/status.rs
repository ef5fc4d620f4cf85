//! C-compatible status codes.
//!
//! [`PysqStatus`] is a `repr(i32)` enum covering every error condition of
//! the variable table plus the conditions only the C boundary can hit
//! (null out-pointers, poisoned lock, caught panic).

use pysq_core::TableError;

/// C-compatible status code returned by the FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PysqStatus {
    /// Success.
    Ok = 0,
    /// Slot index is outside the table.
    IndexOutOfRange = -1,
    /// The allocation could not be satisfied.
    OutOfMemory = -2,
    /// The slot is already initialized and the table rejects overwrites.
    AlreadyInitialized = -3,
    /// The slot was already released.
    DoubleFree = -4,
    /// The slot is not initialized.
    UseAfterFree = -5,
    /// The slot's buffer is too small for the requested access.
    BufferTooSmall = -6,
    /// An out-pointer is null or an argument is otherwise invalid.
    InvalidArgument = -7,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -8,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&TableError> for PysqStatus {
    fn from(e: &TableError) -> Self {
        match e {
            TableError::IndexOutOfRange { .. } => PysqStatus::IndexOutOfRange,
            TableError::OutOfMemory { .. } => PysqStatus::OutOfMemory,
            TableError::AlreadyInitialized { .. } => PysqStatus::AlreadyInitialized,
            TableError::DoubleFree { .. } => PysqStatus::DoubleFree,
            TableError::UseAfterFree { .. } => PysqStatus::UseAfterFree,
            TableError::BufferTooSmall { .. } => PysqStatus::BufferTooSmall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(PysqStatus::Ok as i32, 0);
        assert_eq!(PysqStatus::IndexOutOfRange as i32, -1);
        assert_eq!(PysqStatus::OutOfMemory as i32, -2);
        assert_eq!(PysqStatus::AlreadyInitialized as i32, -3);
        assert_eq!(PysqStatus::DoubleFree as i32, -4);
        assert_eq!(PysqStatus::UseAfterFree as i32, -5);
        assert_eq!(PysqStatus::BufferTooSmall as i32, -6);
        assert_eq!(PysqStatus::InvalidArgument as i32, -7);
        assert_eq!(PysqStatus::InternalError as i32, -8);
    }

    #[test]
    fn table_error_to_status() {
        assert_eq!(
            PysqStatus::from(&TableError::IndexOutOfRange {
                index: 256,
                capacity: 256
            }),
            PysqStatus::IndexOutOfRange
        );
        assert_eq!(
            PysqStatus::from(&TableError::OutOfMemory { requested: 8 }),
            PysqStatus::OutOfMemory
        );
        assert_eq!(
            PysqStatus::from(&TableError::AlreadyInitialized { index: 1 }),
            PysqStatus::AlreadyInitialized
        );
        assert_eq!(
            PysqStatus::from(&TableError::DoubleFree { index: 1 }),
            PysqStatus::DoubleFree
        );
        assert_eq!(
            PysqStatus::from(&TableError::UseAfterFree { index: 1 }),
            PysqStatus::UseAfterFree
        );
        assert_eq!(
            PysqStatus::from(&TableError::BufferTooSmall {
                index: 1,
                required: 4,
                actual: 2
            }),
            PysqStatus::BufferTooSmall
        );
    }

    #[test]
    fn panicked_status_is_negative_128() {
        assert_eq!(PysqStatus::Panicked as i32, -128);
    }
}
