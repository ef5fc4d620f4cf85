//! Test utilities and fixtures for py-squared development.
//!
//! Provides a [`TestTableBuilder`] for tables with preloaded slots, a set
//! of [`samples`] with their expected output, and failure-injecting
//! fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod samples;

use pysq_core::{PrimitiveType, TableError};
use pysq_runtime::{ConfigError, OverwritePolicy, TableConfig, VariableTable};

/// Why a [`TestTableBuilder`] could not build its table.
#[derive(Debug, PartialEq, Eq)]
pub enum FixtureError {
    Config(ConfigError),
    Table(TableError),
}

/// Builder for variable tables with preconfigured state.
///
/// Slots added with [`int`](TestTableBuilder::int) are created with the
/// size an `int` declaration uses and hold the given value.
pub struct TestTableBuilder {
    config: TableConfig,
    ints: Vec<(usize, i32)>,
}

impl TestTableBuilder {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
            ints: Vec::new(),
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.config.overwrite = policy;
        self
    }

    pub fn memory_limit(mut self, limit: usize) -> Self {
        self.config.memory_limit = Some(limit);
        self
    }

    /// Preload slot `index` with an `int` holding `value`.
    pub fn int(mut self, index: usize, value: i32) -> Self {
        self.ints.push((index, value));
        self
    }

    /// Build the table.
    ///
    /// # Panics
    ///
    /// If the configuration is invalid or a preloaded slot cannot be
    /// created.
    pub fn build(self) -> VariableTable {
        self.try_build().expect("TestTableBuilder: invalid fixture")
    }

    pub fn try_build(self) -> Result<VariableTable, FixtureError> {
        let mut table = VariableTable::new(self.config).map_err(FixtureError::Config)?;
        for (index, value) in self.ints {
            table
                .create_variable(index, PrimitiveType::Int.slot_size())
                .and_then(|_| table.write_int(index, value))
                .map_err(FixtureError::Table)?;
        }
        Ok(table)
    }
}

impl Default for TestTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preloads_ints() {
        let table = TestTableBuilder::new().int(0, 5).int(3, -2).build();
        assert_eq!(table.live_count(), 2);
        assert_eq!(table.read_int(0), Ok(5));
        assert_eq!(table.read_int(3), Ok(-2));
        assert_eq!(table.size_of(3), Ok(8));
    }

    #[test]
    fn builder_applies_config() {
        let table = TestTableBuilder::new()
            .capacity(4)
            .overwrite(OverwritePolicy::Replace)
            .memory_limit(64)
            .build();
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.config().overwrite, OverwritePolicy::Replace);
        assert_eq!(table.config().memory_limit, Some(64));
    }

    #[test]
    fn try_build_reports_bad_slot() {
        let err = TestTableBuilder::new().capacity(2).int(2, 1).try_build();
        assert!(matches!(
            err,
            Err(FixtureError::Table(TableError::IndexOutOfRange { index: 2, .. }))
        ));
    }

    #[test]
    fn try_build_reports_bad_config() {
        let err = TestTableBuilder::new().capacity(0).try_build();
        assert_eq!(err.err(), Some(FixtureError::Config(ConfigError::ZeroCapacity)));
    }
}
