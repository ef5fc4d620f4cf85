//! Variable table runtime for py-squared programs.
//!
//! Generated programs keep every variable in a fixed-capacity table of
//! heap allocations. This crate provides that table, the integer print
//! helper, and the entry point that runs a program body and then releases
//! whatever the body left allocated.
//!
//! # Architecture
//!
//! ```text
//! VariableTable (owned, passed by &mut)
//! ├── Slot × capacity (Option<Box<[u8]>> + generation counter)
//! ├── TableConfig (capacity, overwrite policy, memory limit)
//! └── allocated_bytes accounting
//!
//! VariableHandle  (slot, generation)   : detects use-after-free / double free
//! VariableGuard   (&mut table, handle) : releases on drop
//! entry::execute  body → cleanup → RunReport
//! ```
//!
//! Every operation is bounds-checked and reports failures through
//! [`TableError`](pysq_core::TableError); nothing in this crate aborts the
//! process on bad input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod entry;
pub mod guard;
pub mod handle;
pub mod print;
mod slot;
pub mod table;

// Public re-exports for the primary API surface.
pub use config::{ConfigError, OverwritePolicy, TableConfig};
pub use entry::{execute, ProgramBody, RunReport};
pub use guard::VariableGuard;
pub use handle::VariableHandle;
pub use print::{print, print_to};
pub use pysq_core::TableError;
pub use table::VariableTable;
