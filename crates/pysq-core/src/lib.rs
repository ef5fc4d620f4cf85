//! Core types for the py-squared runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the runtime, the compiler and the C ABI:
//! variable identifiers, the primitive type table, and the error
//! taxonomy for variable table operations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod primitive;

pub use error::TableError;
pub use id::VariableId;
pub use primitive::PrimitiveType;
