//! Compiler and interpreter error types.

use std::error::Error;
use std::fmt;
use std::io;

use pysq_core::TableError;

use crate::span::Span;

/// Errors raised while turning source text into a checked syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// A character that cannot start or continue any token.
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Where it was found.
        span: Span,
    },
    /// A token that does not fit the grammar at this point.
    UnexpectedToken {
        /// The token's source text (empty at end of input).
        found: String,
        /// What the parser was looking for.
        expected: &'static str,
        /// Where it was found.
        span: Span,
    },
    /// A `(` with no matching `)`.
    UnclosedParen {
        /// Location of the opening parenthesis.
        span: Span,
    },
    /// A literal that is neither an identifier nor an integer.
    InvalidLiteral {
        /// The literal text.
        lexeme: String,
        /// Where it was found.
        span: Span,
    },
    /// An integer literal that does not fit in an `int`.
    IntegerOutOfRange {
        /// The literal text.
        lexeme: String,
        /// Where it was found.
        span: Span,
    },
    /// A declaration naming a type that is not a primitive keyword.
    UnknownType {
        /// The type name.
        name: String,
        /// Where it was found.
        span: Span,
    },
    /// A read of a name that was never declared.
    UndefinedVariable {
        /// The variable name.
        name: String,
        /// Where it was read.
        span: Span,
    },
    /// A call to a function that is not a built-in.
    UnknownFunction {
        /// The function name.
        name: String,
        /// Where it was called.
        span: Span,
    },
    /// A built-in called with the wrong number of arguments.
    WrongArity {
        /// The function name.
        name: String,
        /// Number of parameters the built-in takes.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
        /// Where it was called.
        span: Span,
    },
    /// A call that produces no value used where a value is required.
    VoidValue {
        /// The function name.
        name: String,
        /// Where it was called.
        span: Span,
    },
    /// More declarations than the runtime table has slots.
    TooManyVariables {
        /// Slot count of the target table.
        capacity: usize,
        /// The declaration that overflowed.
        span: Span,
    },
}

impl CompileError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar { span, .. }
            | Self::UnexpectedToken { span, .. }
            | Self::UnclosedParen { span }
            | Self::InvalidLiteral { span, .. }
            | Self::IntegerOutOfRange { span, .. }
            | Self::UnknownType { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::UnknownFunction { span, .. }
            | Self::WrongArity { span, .. }
            | Self::VoidValue { span, .. }
            | Self::TooManyVariables { span, .. } => *span,
        }
    }

    /// The message without the location prefix.
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedChar { ch, .. } => format!("unexpected character {ch:?}"),
            Self::UnexpectedToken {
                found, expected, ..
            } => {
                if found.is_empty() {
                    format!("expected {expected}, found end of input")
                } else {
                    format!("expected {expected}, found `{found}`")
                }
            }
            Self::UnclosedParen { .. } => "parenthesis is never closed".to_string(),
            Self::InvalidLiteral { lexeme, .. } => format!("invalid literal `{lexeme}`"),
            Self::IntegerOutOfRange { lexeme, .. } => {
                format!("integer `{lexeme}` does not fit in an int")
            }
            Self::UnknownType { name, .. } => format!("unknown type `{name}`"),
            Self::UndefinedVariable { name, .. } => format!("undefined variable `{name}`"),
            Self::UnknownFunction { name, .. } => format!("unknown function `{name}`"),
            Self::WrongArity {
                name,
                expected,
                found,
                ..
            } => format!("`{name}` takes {expected} argument(s), {found} given"),
            Self::VoidValue { name, .. } => format!("`{name}` does not produce a value"),
            Self::TooManyVariables { capacity, .. } => {
                format!("too many variables: the runtime table holds {capacity}")
            }
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span(), self.message())
    }
}

impl Error for CompileError {}

/// Errors raised while interpreting a lowered program.
#[derive(Debug)]
pub enum RuntimeError {
    /// A variable table operation failed.
    Table(TableError),
    /// Writing program output failed.
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(e) => write!(f, "variable table: {e}"),
            Self::Io(e) => write!(f, "output: {e}"),
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<TableError> for RuntimeError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
