//! Variable handles.
//!
//! A [`VariableHandle`] names one specific allocation: the slot index plus
//! the slot's generation at the time the allocation was made. Every release
//! bumps the slot generation, so a handle outliving its allocation is
//! detected in O(1) instead of aliasing whatever the slot holds next.

use std::fmt;

/// Generation-checked reference to a live variable allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct VariableHandle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl VariableHandle {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot this handle points into.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The slot generation when the allocation was made.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for VariableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariableHandle(slot={}, gen={})", self.index, self.generation)
    }
}
