//! Variable registry: maps source names to table slots.
//!
//! Every declaration takes the next sequential [`VariableId`], including a
//! re-declaration of a name already in use. Reads resolve to the most
//! recent declaration, so earlier slots stay allocated until cleanup.

use indexmap::IndexMap;
use pysq_core::{PrimitiveType, VariableId};

/// A declared variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Variable {
    /// Slot assigned to the declaration.
    pub id: VariableId,
    /// Declared type.
    pub ty: PrimitiveType,
}

/// Name → variable mapping for one compilation unit.
#[derive(Debug)]
pub struct VariableRegistry {
    /// Latest declaration per name, in first-declaration order.
    variables: IndexMap<String, Variable>,
    next_id: u32,
    capacity: usize,
}

impl VariableRegistry {
    /// Create an empty registry for a table of `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            variables: IndexMap::new(),
            next_id: 0,
            capacity,
        }
    }

    /// Declare `name` with type `ty`, returning its fresh slot.
    ///
    /// Returns `None` when every slot of the table has been handed out.
    pub fn declare(&mut self, name: &str, ty: PrimitiveType) -> Option<Variable> {
        if self.next_id as usize >= self.capacity {
            return None;
        }
        let var = Variable {
            id: VariableId(self.next_id),
            ty,
        };
        self.next_id += 1;
        self.variables.insert(name.to_string(), var);
        Some(var)
    }

    /// Resolve a name to its latest declaration.
    pub fn resolve(&self, name: &str) -> Option<Variable> {
        self.variables.get(name).copied()
    }

    /// Number of slots handed out so far.
    pub fn slot_count(&self) -> usize {
        self.next_id as usize
    }

    /// Slot count of the target table.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate visible names and their latest declarations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Variable)> + '_ {
        self.variables.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
