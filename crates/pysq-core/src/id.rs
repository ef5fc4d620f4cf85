//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a variable slot within a variable table.
///
/// The compiler assigns sequential IDs to declarations, starting at 0;
/// `VariableId(n)` addresses slot `n` of the runtime table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub u32);

impl VariableId {
    /// The slot index this ID addresses.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VariableId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
