use std::io::Write;
use std::path::Path;

use pysq_compiler::{compile, dump_ast};

use super::{read_source, write_failed};
use crate::error::{Error, Result};

/// Run the ast subcommand: the checked tree as an indented dump
pub fn ast(input: &Path, out: &mut dyn Write) -> Result<()> {
    let source = read_source(input)?;
    let path = input.display().to_string();
    let module = compile(&source).map_err(|e| Error::compile(&path, &source, &e))?;
    out.write_all(dump_ast(&module).as_bytes())
        .map_err(|e| write_failed("<stdout>", e))
}
