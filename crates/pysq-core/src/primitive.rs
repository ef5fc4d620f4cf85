//! Primitive value types understood by the runtime.

use std::fmt;

/// A primitive variable type.
///
/// `int` is the only primitive today. Its slot size matches what the
/// generator has always requested (8 bytes) even though only the first
/// four bytes carry the native-endian `i32` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// A 32-bit signed integer (`int` in source and in generated C).
    Int,
}

impl PrimitiveType {
    /// Look up a primitive by its source keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(Self::Int),
            _ => None,
        }
    }

    /// The source keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Int => "int",
        }
    }

    /// Number of bytes requested from the table for a slot of this type.
    pub fn slot_size(self) -> usize {
        match self {
            Self::Int => 8,
        }
    }

    /// Number of bytes the value itself occupies inside the slot.
    pub fn value_size(self) -> usize {
        match self {
            Self::Int => std::mem::size_of::<i32>(),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
