//! Front end and back ends for the py-squared language.
//!
//! ```text
//! source ─ lexer ─▶ tokens ─ parser ─▶ Module ─┬─ codegen ─▶ C translation unit
//!                           (VariableRegistry) └─ lower ───▶ Program ─ interp ─▶ VariableTable
//! ```
//!
//! The parser resolves every name against a [`VariableRegistry`] sized to
//! the target runtime table, so both back ends work on a fully checked
//! tree: the C emitter targets the `pysq-ffi` C ABI, and the interpreter
//! runs the same program in-process through
//! [`pysq_runtime::execute`].
//!
//! # Example
//!
//! ```rust
//! use pysq_compiler::{compile, Program};
//! use pysq_runtime::{execute, TableConfig, VariableTable};
//!
//! let module = compile("x: int = 5\nprint(x)").unwrap();
//! let mut program = Program::lower(&module);
//! let mut table = VariableTable::new(TableConfig::default()).unwrap();
//! let mut out = Vec::new();
//! let report = execute(&mut program, &mut table, &mut out);
//! assert_eq!(report.exit_code(), 0);
//! assert_eq!(out, b"5\n");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ast;
pub mod builtin;
pub mod codegen;
pub mod error;
mod interp;
pub mod lexer;
pub mod lower;
pub mod parser;
pub mod span;
pub mod symbols;
pub mod token;

pub use ast::{dump_ast, Expr, Module, Stmt};
pub use builtin::Builtin;
pub use codegen::{emit_c, emit_c_with_template};
pub use error::{CompileError, RuntimeError};
pub use lexer::tokenize;
pub use lower::{Instr, Operand, Program};
pub use parser::Parser;
pub use span::Span;
pub use symbols::{Variable, VariableRegistry};
pub use token::{Token, TokenKind};

use pysq_runtime::TableConfig;

/// Parse `source` for a table of the default capacity.
pub fn compile(source: &str) -> Result<Module, CompileError> {
    compile_for(source, TableConfig::DEFAULT_CAPACITY)
}

/// Parse `source` for a table of `capacity` slots.
pub fn compile_for(source: &str, capacity: usize) -> Result<Module, CompileError> {
    let tokens = tokenize(source)?;
    Parser::new(&tokens, capacity).parse_module()
}
