//! Scoped variable allocations.
//!
//! [`VariableGuard`] owns one allocation for the length of a scope: it
//! releases the slot when dropped unless [`keep`](VariableGuard::keep)
//! hands the allocation back to the table. Because the guard borrows the
//! table mutably, nothing else can free the slot underneath it.

use std::ops::{Deref, DerefMut};

use pysq_core::TableError;

use crate::handle::VariableHandle;
use crate::table::VariableTable;

/// Releases its slot on drop.
pub struct VariableGuard<'t> {
    table: &'t mut VariableTable,
    handle: VariableHandle,
    armed: bool,
}

impl<'t> VariableGuard<'t> {
    pub(crate) fn new(table: &'t mut VariableTable, handle: VariableHandle) -> Self {
        Self {
            table,
            handle,
            armed: true,
        }
    }

    /// Handle of the guarded allocation.
    pub fn handle(&self) -> VariableHandle {
        self.handle
    }

    /// Slot index of the guarded allocation.
    pub fn index(&self) -> usize {
        self.handle.index()
    }

    /// Read the guarded slot as an `int`.
    pub fn read_int(&self) -> Result<i32, TableError> {
        self.table.read_int(self.handle.index())
    }

    /// Store an `int` into the guarded slot.
    pub fn write_int(&mut self, value: i32) -> Result<(), TableError> {
        self.table.write_int(self.handle.index(), value)
    }

    /// Disarm the guard and leave the allocation in the table.
    pub fn keep(mut self) -> VariableHandle {
        self.armed = false;
        self.handle
    }

    /// Release the allocation now.
    pub fn release(mut self) -> Result<(), TableError> {
        self.armed = false;
        self.table.release(self.handle)
    }
}

impl Deref for VariableGuard<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.table.get(self.handle).unwrap_or(&[])
    }
}

impl DerefMut for VariableGuard<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.table.get_mut(self.handle).unwrap_or(&mut [])
    }
}

impl Drop for VariableGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.table.release(self.handle);
        }
    }
}
