use std::io::Write;
use std::path::Path;

use pysq_compiler::tokenize;

use super::{read_source, write_failed};
use crate::error::{Error, Result};

/// Run the tokens subcommand: one token per line, ending with `Eof`
pub fn tokens(input: &Path, out: &mut dyn Write) -> Result<()> {
    let source = read_source(input)?;
    let path = input.display().to_string();
    let tokens = tokenize(&source).map_err(|e| Error::compile(&path, &source, &e))?;
    for token in &tokens {
        writeln!(out, "{token}").map_err(|e| write_failed("<stdout>", e))?;
    }
    Ok(())
}
