//! Benchmark profiles for the py-squared table runtime.
//!
//! - [`full_table`]: every slot of a default table holding an `int`
//! - [`mixed_sizes`]: deterministic allocation sizes for churn benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pysq_core::{PrimitiveType, TableError};
use pysq_runtime::{TableConfig, VariableTable};

/// A default-capacity table with every slot holding an `int` equal to its index.
pub fn full_table() -> Result<VariableTable, TableError> {
    let mut table = VariableTable::default();
    let size = PrimitiveType::Int.slot_size();
    for index in 0..table.capacity() {
        table.create_variable(index, size)?;
        table.write_int(index, index as i32)?;
    }
    Ok(table)
}

/// `count` allocation sizes cycling through 4, 8, 16, ... 512 bytes.
pub fn mixed_sizes(count: usize) -> Vec<usize> {
    (0..count).map(|i| 4usize << (i % 8)).collect()
}

/// Slot count of the default table.
pub const CAPACITY: usize = TableConfig::DEFAULT_CAPACITY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_table_is_full() {
        let table = full_table().unwrap();
        assert_eq!(table.live_count(), CAPACITY);
        assert_eq!(table.read_int(CAPACITY - 1), Ok(CAPACITY as i32 - 1));
    }

    #[test]
    fn mixed_sizes_cycle() {
        assert_eq!(mixed_sizes(9), vec![4, 8, 16, 32, 64, 128, 256, 512, 4]);
    }
}
