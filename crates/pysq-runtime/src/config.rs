//! Variable table configuration parameters.

use std::error::Error;
use std::fmt;

/// What `create_variable` does when the target slot is already initialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Fail with [`TableError::AlreadyInitialized`](pysq_core::TableError)
    /// and keep the existing allocation.
    #[default]
    Reject,
    /// Release the existing allocation, then allocate the new one.
    Replace,
}

impl OverwritePolicy {
    /// Parse a policy name (`"reject"` or `"replace"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reject" => Some(Self::Reject),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}

/// Configuration for a [`VariableTable`](crate::VariableTable).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of slots. Default: 256. Must be at least 1.
    pub capacity: usize,

    /// Policy for `create_variable` on an initialized slot.
    pub overwrite: OverwritePolicy,

    /// Upper bound on the sum of all live allocation sizes, in bytes.
    ///
    /// `None` (the default) leaves the limit to the system allocator.
    /// Requests that would cross the limit fail with `OutOfMemory`.
    pub memory_limit: Option<usize>,
}

impl TableConfig {
    /// Default slot count, the size of the table generated programs expect.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Largest accepted slot count.
    pub const MAX_CAPACITY: usize = 1 << 20;

    /// Create a config with the given capacity and default policies.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            overwrite: OverwritePolicy::default(),
            memory_limit: None,
        }
    }

    /// Set the overwrite policy.
    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the memory limit in bytes.
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = Some(limit);
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > Self::MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: Self::MAX_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Errors detected by [`TableConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The table would have no slots.
    ZeroCapacity,
    /// More slots than [`TableConfig::MAX_CAPACITY`].
    CapacityTooLarge {
        /// Requested slot count.
        capacity: usize,
        /// The accepted maximum.
        max: usize,
    },
    /// The allocator refused the slot array itself.
    OutOfMemory {
        /// Requested slot count.
        capacity: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "table capacity must be at least 1"),
            Self::CapacityTooLarge { capacity, max } => {
                write!(f, "table capacity {capacity} exceeds the maximum of {max}")
            }
            Self::OutOfMemory { capacity } => {
                write!(f, "cannot allocate a table of {capacity} slots")
            }
        }
    }
}

impl Error for ConfigError {}
