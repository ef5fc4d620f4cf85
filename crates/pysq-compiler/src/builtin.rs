//! Built-in functions callable from py-squared source.

use std::fmt;

/// A built-in function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `print(x)`: write an int and a newline to standard output.
    Print,
}

impl Builtin {
    /// Look up a built-in by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "print" => Some(Self::Print),
            _ => None,
        }
    }

    /// Source name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Print => "print",
        }
    }

    /// Number of arguments the built-in takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Print => 1,
        }
    }

    /// Whether a call yields a value usable in an expression.
    pub fn returns_value(self) -> bool {
        match self {
            Self::Print => false,
        }
    }

    /// Name of the C ABI function generated code calls.
    pub fn c_symbol(self) -> &'static str {
        match self {
            Self::Print => "pysq_print",
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
