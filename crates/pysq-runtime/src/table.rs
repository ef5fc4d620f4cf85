//! The fixed-capacity variable table.
//!
//! [`VariableTable`] owns `capacity` slots, each of which either owns a
//! heap byte buffer or is empty. All accessors are bounds-checked and
//! return [`TableError`] instead of touching memory they do not own.
//!
//! Two addressing styles coexist:
//!
//! - **By index** (`create_variable`, `free_variable`, `bytes`,
//!   `read_int`, ...): what generated programs use. Freeing an empty slot
//!   is a no-op, so repeated frees are harmless.
//! - **By handle** ([`VariableHandle`]): names one allocation. A handle
//!   whose allocation was released is stale; `get` reports
//!   `UseAfterFree` and `release` reports `DoubleFree`.

use log::{debug, warn};
use pysq_core::TableError;

use crate::config::{ConfigError, OverwritePolicy, TableConfig};
use crate::guard::VariableGuard;
use crate::handle::VariableHandle;
use crate::slot::{allocate, Slot};

/// Fixed-capacity table of heap-allocated variables.
///
/// Every slot starts uninitialized. Dropping the table runs
/// [`cleanup`](VariableTable::cleanup).
#[derive(Debug)]
pub struct VariableTable {
    slots: Box<[Slot]>,
    config: TableConfig,
    /// Sum of the sizes of all live allocations.
    allocated_bytes: usize,
}

impl VariableTable {
    /// Create a table from a validated config.
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(config.capacity)
            .map_err(|_| ConfigError::OutOfMemory {
                capacity: config.capacity,
            })?;
        slots.resize_with(config.capacity, Slot::default);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            config,
            allocated_bytes: 0,
        })
    }

    /// The config this table was built with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Result<&Slot, TableError> {
        self.slots.get(index).ok_or(TableError::IndexOutOfRange {
            index,
            capacity: self.slots.len(),
        })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot, TableError> {
        let capacity = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(TableError::IndexOutOfRange { index, capacity })
    }

    /// Allocate a zeroed `size`-byte buffer into slot `index`.
    ///
    /// If the slot is already initialized the configured
    /// [`OverwritePolicy`] decides: `Reject` fails with
    /// `AlreadyInitialized`, `Replace` releases the old buffer first.
    /// On any error the table is unchanged.
    pub fn create_variable(
        &mut self,
        index: usize,
        size: usize,
    ) -> Result<VariableHandle, TableError> {
        let overwrite = self.config.overwrite;
        let old_size = self.slot(index)?.size();

        if old_size.is_some() && overwrite == OverwritePolicy::Reject {
            return Err(TableError::AlreadyInitialized { index });
        }

        let retained = self.allocated_bytes - old_size.unwrap_or(0);
        if let Some(limit) = self.config.memory_limit {
            match retained.checked_add(size) {
                Some(total) if total <= limit => {}
                _ => return Err(TableError::OutOfMemory { requested: size }),
            }
        }

        // Allocate before releasing so a failed replace keeps the old buffer.
        let buf = allocate(size)?;
        let slot = self.slot_mut(index)?;
        if let Some(released) = slot.release() {
            warn!("create_variable: replacing live slot {index} ({released} bytes)");
        }
        slot.install(buf);
        let generation = slot.generation();
        self.allocated_bytes = retained + size;
        debug!("create_variable: slot {index}, {size} bytes, gen {generation}");
        Ok(VariableHandle::new(index, generation))
    }

    /// Release slot `index` and mark it uninitialized.
    ///
    /// Returns `Ok(true)` if a buffer was released and `Ok(false)` if the
    /// slot was already empty.
    pub fn free_variable(&mut self, index: usize) -> Result<bool, TableError> {
        match self.slot_mut(index)?.release() {
            Some(size) => {
                self.allocated_bytes -= size;
                debug!("free_variable: slot {index}, {size} bytes");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Release the allocation named by `handle`.
    ///
    /// Unlike [`free_variable`](Self::free_variable) this is strict: a
    /// handle whose allocation is already gone fails with `DoubleFree`.
    pub fn release(&mut self, handle: VariableHandle) -> Result<(), TableError> {
        let index = handle.index;
        if !self.is_live(handle) {
            self.slot(index)?;
            return Err(TableError::DoubleFree { index });
        }
        self.free_variable(index).map(|_| ())
    }

    /// Whether slot `index` owns an allocation. Out-of-range indices
    /// are never initialized.
    pub fn is_initialized(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.is_initialized())
    }

    /// Whether `handle` still names a live allocation.
    pub fn is_live(&self, handle: VariableHandle) -> bool {
        self.slots.get(handle.index).is_some_and(|slot| {
            slot.is_initialized() && slot.generation() == handle.generation
        })
    }

    /// Current handle for slot `index`, if it is initialized.
    pub fn handle(&self, index: usize) -> Result<VariableHandle, TableError> {
        let slot = self.slot(index)?;
        if !slot.is_initialized() {
            return Err(TableError::UseAfterFree { index });
        }
        Ok(VariableHandle::new(index, slot.generation()))
    }

    /// Size in bytes of the buffer in slot `index`.
    pub fn size_of(&self, index: usize) -> Result<usize, TableError> {
        self.slot(index)?
            .size()
            .ok_or(TableError::UseAfterFree { index })
    }

    /// Shared view of the buffer in slot `index`.
    pub fn bytes(&self, index: usize) -> Result<&[u8], TableError> {
        self.slot(index)?
            .data()
            .ok_or(TableError::UseAfterFree { index })
    }

    /// Mutable view of the buffer in slot `index`.
    pub fn bytes_mut(&mut self, index: usize) -> Result<&mut [u8], TableError> {
        self.slot_mut(index)?
            .data_mut()
            .ok_or(TableError::UseAfterFree { index })
    }

    /// Shared view of the allocation named by `handle`.
    pub fn get(&self, handle: VariableHandle) -> Result<&[u8], TableError> {
        self.check_live(handle)?;
        self.bytes(handle.index)
    }

    /// Mutable view of the allocation named by `handle`.
    pub fn get_mut(&mut self, handle: VariableHandle) -> Result<&mut [u8], TableError> {
        self.check_live(handle)?;
        self.bytes_mut(handle.index)
    }

    fn check_live(&self, handle: VariableHandle) -> Result<(), TableError> {
        let slot = self.slot(handle.index)?;
        if slot.is_initialized() && slot.generation() == handle.generation {
            Ok(())
        } else {
            Err(TableError::UseAfterFree {
                index: handle.index,
            })
        }
    }

    /// Read the `int` stored in slot `index` (native-endian `i32` in the
    /// first four bytes, the layout generated C code uses).
    pub fn read_int(&self, index: usize) -> Result<i32, TableError> {
        let data = self.bytes(index)?;
        let bytes = int_bytes(index, data)?;
        let mut raw = [0u8; INT_SIZE];
        raw.copy_from_slice(bytes);
        Ok(i32::from_ne_bytes(raw))
    }

    /// Store an `int` into slot `index`.
    pub fn write_int(&mut self, index: usize, value: i32) -> Result<(), TableError> {
        let data = self.bytes_mut(index)?;
        let actual = data.len();
        match data.get_mut(..INT_SIZE) {
            Some(dst) => {
                dst.copy_from_slice(&value.to_ne_bytes());
                Ok(())
            }
            None => Err(TableError::BufferTooSmall {
                index,
                required: INT_SIZE,
                actual,
            }),
        }
    }

    /// Number of initialized slots.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_initialized()).count()
    }

    /// Sum of the sizes of all live allocations, in bytes.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes
    }

    /// Iterate `(index, size)` over initialized slots in index order.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.size().map(|size| (i, size)))
    }

    /// Release every initialized slot. Returns how many were released.
    ///
    /// Empty slots are skipped, so calling this twice is harmless.
    pub fn cleanup(&mut self) -> usize {
        let mut released = 0;
        for slot in self.slots.iter_mut() {
            if slot.release().is_some() {
                released += 1;
            }
        }
        self.allocated_bytes = 0;
        if released > 0 {
            debug!("cleanup: released {released} slots");
        }
        released
    }

    /// Allocate slot `index` and return a guard that releases it on drop.
    pub fn scoped(&mut self, index: usize, size: usize) -> Result<VariableGuard<'_>, TableError> {
        let handle = self.create_variable(index, size)?;
        Ok(VariableGuard::new(self, handle))
    }
}

impl Default for VariableTable {
    fn default() -> Self {
        Self {
            slots: (0..TableConfig::DEFAULT_CAPACITY)
                .map(|_| Slot::default())
                .collect(),
            config: TableConfig::default(),
            allocated_bytes: 0,
        }
    }
}

impl Drop for VariableTable {
    fn drop(&mut self) {
        self.cleanup();
    }
}

const INT_SIZE: usize = std::mem::size_of::<i32>();

fn int_bytes(index: usize, data: &[u8]) -> Result<&[u8], TableError> {
    data.get(..INT_SIZE).ok_or(TableError::BufferTooSmall {
        index,
        required: INT_SIZE,
        actual: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VariableTable {
        VariableTable::new(TableConfig::default()).unwrap()
    }

    #[test]
    fn new_table_is_empty() {
        let t = table();
        assert_eq!(t.capacity(), 256);
        assert_eq!(t.live_count(), 0);
        assert!((0..256).all(|i| !t.is_initialized(i)));
    }

    #[test]
    fn zero_capacity_config_rejected() {
        assert_eq!(
            VariableTable::new(TableConfig::new(0)).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[test]
    fn huge_capacity_is_an_error_not_a_panic() {
        assert!(matches!(
            VariableTable::new(TableConfig::new(usize::MAX / 8)),
            Err(ConfigError::CapacityTooLarge { .. })
        ));
        let largest = VariableTable::new(TableConfig::new(TableConfig::MAX_CAPACITY)).unwrap();
        assert_eq!(largest.capacity(), TableConfig::MAX_CAPACITY);
    }

    #[test]
    fn create_initializes_slot_with_requested_size() {
        let mut t = table();
        let h = t.create_variable(3, 16).unwrap();
        assert!(t.is_initialized(3));
        assert_eq!(t.size_of(3).unwrap(), 16);
        assert_eq!(h.index(), 3);
        assert_eq!(t.get(h).unwrap().len(), 16);
        assert_eq!(t.allocated_bytes(), 16);
    }

    #[test]
    fn create_out_of_range_fails_without_change() {
        let mut t = table();
        assert_eq!(
            t.create_variable(256, 8),
            Err(TableError::IndexOutOfRange {
                index: 256,
                capacity: 256
            })
        );
        assert_eq!(t.live_count(), 0);
    }

    #[test]
    fn free_then_free_again_is_noop() {
        let mut t = table();
        t.create_variable(5, 8).unwrap();
        assert_eq!(t.free_variable(5), Ok(true));
        assert!(!t.is_initialized(5));
        assert_eq!(t.free_variable(5), Ok(false));
        assert_eq!(t.allocated_bytes(), 0);
    }

    #[test]
    fn free_never_created_slot_is_noop() {
        let mut t = table();
        assert_eq!(t.free_variable(0), Ok(false));
    }

    #[test]
    fn free_out_of_range_fails() {
        let mut t = table();
        assert!(matches!(
            t.free_variable(1000),
            Err(TableError::IndexOutOfRange { index: 1000, .. })
        ));
    }

    #[test]
    fn double_create_rejected_by_default() {
        let mut t = table();
        let h = t.create_variable(1, 4).unwrap();
        t.write_int(1, 77).unwrap();
        assert_eq!(
            t.create_variable(1, 8),
            Err(TableError::AlreadyInitialized { index: 1 })
        );
        // Old allocation untouched.
        assert!(t.is_live(h));
        assert_eq!(t.size_of(1).unwrap(), 4);
        assert_eq!(t.read_int(1).unwrap(), 77);
        assert_eq!(t.allocated_bytes(), 4);
    }

    #[test]
    fn double_create_replaces_when_configured() {
        let config = TableConfig::default().with_overwrite(OverwritePolicy::Replace);
        let mut t = VariableTable::new(config).unwrap();
        let old = t.create_variable(1, 4).unwrap();
        t.write_int(1, 77).unwrap();
        let new = t.create_variable(1, 8).unwrap();
        assert!(!t.is_live(old));
        assert!(t.is_live(new));
        assert_eq!(t.size_of(1).unwrap(), 8);
        assert_eq!(t.read_int(1).unwrap(), 0);
        assert_eq!(t.allocated_bytes(), 8);
        assert_eq!(t.live_count(), 1);
    }

    #[test]
    fn memory_limit_yields_out_of_memory() {
        let mut t = VariableTable::new(TableConfig::default().with_memory_limit(16)).unwrap();
        t.create_variable(0, 12).unwrap();
        assert_eq!(
            t.create_variable(1, 8),
            Err(TableError::OutOfMemory { requested: 8 })
        );
        assert!(!t.is_initialized(1));
        t.create_variable(1, 4).unwrap();
        assert_eq!(t.allocated_bytes(), 16);
    }

    #[test]
    fn replace_within_memory_limit_counts_released_bytes() {
        let config = TableConfig::default()
            .with_overwrite(OverwritePolicy::Replace)
            .with_memory_limit(16);
        let mut t = VariableTable::new(config).unwrap();
        t.create_variable(0, 16).unwrap();
        t.create_variable(0, 16).unwrap();
        assert_eq!(t.allocated_bytes(), 16);
    }

    #[test]
    fn failed_replace_keeps_old_allocation() {
        let config = TableConfig::default()
            .with_overwrite(OverwritePolicy::Replace)
            .with_memory_limit(16);
        let mut t = VariableTable::new(config).unwrap();
        let h = t.create_variable(0, 8).unwrap();
        assert!(matches!(
            t.create_variable(0, 32),
            Err(TableError::OutOfMemory { .. })
        ));
        assert!(t.is_live(h));
    }

    #[test]
    fn allocator_refusal_leaves_slot_uninitialized() {
        let mut t = table();
        assert_eq!(
            t.create_variable(2, usize::MAX),
            Err(TableError::OutOfMemory {
                requested: usize::MAX
            })
        );
        assert!(!t.is_initialized(2));
    }

    #[test]
    fn stale_handle_is_use_after_free() {
        let mut t = table();
        let h = t.create_variable(4, 8).unwrap();
        t.free_variable(4).unwrap();
        assert_eq!(t.get(h), Err(TableError::UseAfterFree { index: 4 }));
        // Reallocating the slot does not revive the old handle.
        t.create_variable(4, 8).unwrap();
        assert_eq!(t.get(h), Err(TableError::UseAfterFree { index: 4 }));
    }

    #[test]
    fn release_twice_is_double_free() {
        let mut t = table();
        let h = t.create_variable(9, 8).unwrap();
        assert_eq!(t.release(h), Ok(()));
        assert_eq!(t.release(h), Err(TableError::DoubleFree { index: 9 }));
    }

    #[test]
    fn release_stale_handle_leaves_new_allocation() {
        let mut t = table();
        let old = t.create_variable(9, 8).unwrap();
        t.free_variable(9).unwrap();
        let new = t.create_variable(9, 8).unwrap();
        assert_eq!(t.release(old), Err(TableError::DoubleFree { index: 9 }));
        assert!(t.is_live(new));
    }

    #[test]
    fn uninitialized_access_is_use_after_free() {
        let mut t = table();
        assert_eq!(t.bytes(0), Err(TableError::UseAfterFree { index: 0 }));
        assert_eq!(t.read_int(0), Err(TableError::UseAfterFree { index: 0 }));
        assert_eq!(
            t.write_int(0, 1),
            Err(TableError::UseAfterFree { index: 0 })
        );
        assert_eq!(t.handle(0), Err(TableError::UseAfterFree { index: 0 }));
    }

    #[test]
    fn int_round_trip_uses_native_layout() {
        let mut t = table();
        t.create_variable(0, 8).unwrap();
        t.write_int(0, -5).unwrap();
        assert_eq!(t.read_int(0).unwrap(), -5);
        assert_eq!(&t.bytes(0).unwrap()[..4], &(-5i32).to_ne_bytes());
    }

    #[test]
    fn int_in_small_buffer_fails() {
        let mut t = table();
        t.create_variable(0, 2).unwrap();
        let expected = TableError::BufferTooSmall {
            index: 0,
            required: 4,
            actual: 2,
        };
        assert_eq!(t.write_int(0, 1), Err(expected.clone()));
        assert_eq!(t.read_int(0), Err(expected));
    }

    #[test]
    fn zero_size_variable_is_initialized() {
        let mut t = table();
        t.create_variable(0, 0).unwrap();
        assert!(t.is_initialized(0));
        assert_eq!(t.size_of(0).unwrap(), 0);
    }

    #[test]
    fn cleanup_scenario() {
        let mut t = table();
        t.create_variable(3, 16).unwrap();
        t.create_variable(10, 4).unwrap();
        t.free_variable(3).unwrap();
        assert!(!t.is_initialized(3));
        assert_eq!(t.cleanup(), 1);
        assert!((0..t.capacity()).all(|i| !t.is_initialized(i)));
        assert_eq!(t.allocated_bytes(), 0);
        assert_eq!(t.cleanup(), 0);
    }

    #[test]
    fn iter_live_reports_index_and_size() {
        let mut t = table();
        t.create_variable(7, 3).unwrap();
        t.create_variable(2, 5).unwrap();
        let live: Vec<_> = t.iter_live().collect();
        assert_eq!(live, vec![(2, 5), (7, 3)]);
    }

    #[test]
    fn handle_tracks_current_generation() {
        let mut t = table();
        let h = t.create_variable(1, 1).unwrap();
        assert_eq!(t.handle(1).unwrap(), h);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut t = table();
        let h = t.create_variable(0, 4).unwrap();
        t.get_mut(h).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(t.bytes(0).unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn default_table_matches_default_config() {
        let t = VariableTable::default();
        assert_eq!(t.capacity(), TableConfig::DEFAULT_CAPACITY);
        assert_eq!(t.config(), &TableConfig::default());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Create(usize, usize),
            Free(usize),
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0usize..20, 0usize..64).prop_map(|(i, n)| Op::Create(i, n)),
                (0usize..20).prop_map(Op::Free),
            ]
        }

        proptest! {
            #[test]
            fn created_slot_owns_at_least_requested(index in 0usize..256, size in 0usize..4096) {
                let mut t = VariableTable::default();
                t.create_variable(index, size).unwrap();
                prop_assert!(t.is_initialized(index));
                prop_assert!(t.size_of(index).unwrap() >= size);
            }

            #[test]
            fn accounting_matches_live_slots(ops in proptest::collection::vec(arb_op(), 0..64)) {
                let config = TableConfig::new(16).with_overwrite(OverwritePolicy::Replace);
                let mut t = VariableTable::new(config).unwrap();
                for op in ops {
                    match op {
                        Op::Create(i, n) => { let _ = t.create_variable(i, n); }
                        Op::Free(i) => { let _ = t.free_variable(i); }
                    }
                }
                let live_bytes: usize = t.iter_live().map(|(_, n)| n).sum();
                prop_assert_eq!(t.allocated_bytes(), live_bytes);
                prop_assert_eq!(t.live_count(), t.iter_live().count());
            }

            #[test]
            fn cleanup_always_empties_table(ops in proptest::collection::vec(arb_op(), 0..64)) {
                let mut t = VariableTable::new(TableConfig::new(16)).unwrap();
                for op in ops {
                    match op {
                        Op::Create(i, n) => { let _ = t.create_variable(i, n); }
                        Op::Free(i) => { let _ = t.free_variable(i); }
                    }
                }
                let live = t.live_count();
                prop_assert_eq!(t.cleanup(), live);
                prop_assert_eq!(t.live_count(), 0);
                prop_assert_eq!(t.allocated_bytes(), 0);
            }
        }
    }
}
