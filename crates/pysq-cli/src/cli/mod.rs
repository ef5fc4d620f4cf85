//! Subcommand implementations
//!
//! Each subcommand reads one source file and writes its result to a
//! caller-supplied writer, so the binary and the tests share one path.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub mod ast;
pub mod emit;
pub mod run;
pub mod tokens;

/// Read a source file as UTF-8 text
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_failed(what: &str, e: std::io::Error) -> Error {
    Error::Write {
        path: what.to_string(),
        message: e.to_string(),
    }
}
