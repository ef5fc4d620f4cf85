//! Command-line driver for the py-squared compiler and runtime.

pub mod cli;
pub mod error;

pub use error::{Error, Result};
