use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use pysq_compiler::{compile, emit_c};

use super::{read_source, write_failed};
use crate::error::{Error, Result};

/// Run the emit-c subcommand
///
/// Writes the C translation unit to `output` if given, otherwise to `out`.
pub fn emit_c_file(input: &Path, output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let source = read_source(input)?;
    let path = input.display().to_string();
    let module = compile(&source).map_err(|e| Error::compile(&path, &source, &e))?;
    let c = emit_c(&module);
    match output {
        Some(target) => {
            fs::write(target, c).map_err(|e| Error::Write {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
            info!(
                "emitted {} slots from {} to {}",
                module.slot_count,
                path,
                target.display()
            );
            Ok(())
        }
        None => out
            .write_all(c.as_bytes())
            .map_err(|e| write_failed("<stdout>", e)),
    }
}
