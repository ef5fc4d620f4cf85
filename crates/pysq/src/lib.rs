//! py-squared: a tiny typed language compiled to C over a fixed-capacity
//! variable table.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the py-squared sub-crates. The C ABI lives in `pysq-ffi`, which is
//! linked by generated C programs rather than used from Rust.
//!
//! # Quick start
//!
//! ```rust
//! use pysq::prelude::*;
//!
//! let module = compile("x: int = 5\nprint(x)").unwrap();
//!
//! // Run it in-process...
//! let mut table = VariableTable::new(TableConfig::default()).unwrap();
//! let mut out = Vec::new();
//! let report = execute(&mut Program::lower(&module), &mut table, &mut out);
//! assert!(report.is_ok());
//! assert_eq!(out, b"5\n");
//!
//! // ...or emit a C translation unit.
//! let c = emit_c(&module);
//! assert!(c.contains("pysq_create_variable(0, 8);"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pysq-core` | Variable IDs, primitive types, `TableError` |
//! | [`runtime`] | `pysq-runtime` | Variable table, handles, guards, `print`, program entry |
//! | [`compiler`] | `pysq-compiler` | Lexer, parser, AST dump, lowering, interpreter, C emitter |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`pysq-core`).
pub use pysq_core as types;

/// The variable table runtime (`pysq-runtime`).
///
/// [`runtime::VariableTable`] is the owned slot table; programs run
/// through [`runtime::execute`], which always cleans up afterwards.
pub use pysq_runtime as runtime;

/// Front end and back ends (`pysq-compiler`).
pub use pysq_compiler as compiler;

/// Common imports for typical py-squared usage.
///
/// ```rust
/// use pysq::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pysq_core::{PrimitiveType, TableError, VariableId};

    // Runtime
    pub use pysq_runtime::{
        execute, print, OverwritePolicy, ProgramBody, RunReport, TableConfig, VariableGuard,
        VariableHandle, VariableTable,
    };

    // Compiler
    pub use pysq_compiler::{
        compile, compile_for, dump_ast, emit_c, CompileError, Module, Program, RuntimeError,
    };
}
