use std::io::Write;
use std::path::Path;

use log::info;
use pysq_compiler::{compile_for, Program};
use pysq_runtime::{execute, OverwritePolicy, TableConfig, VariableTable};

use super::read_source;
use crate::error::{Error, Result};

/// Table settings for the run subcommand
#[derive(Clone, Debug, Default)]
pub struct RunArgs {
    pub capacity: Option<usize>,
    pub overwrite: OverwritePolicy,
    pub memory_limit: Option<usize>,
}

impl RunArgs {
    fn config(&self) -> TableConfig {
        let mut config = TableConfig::new(self.capacity.unwrap_or(TableConfig::DEFAULT_CAPACITY))
            .with_overwrite(self.overwrite);
        if let Some(limit) = self.memory_limit {
            config = config.with_memory_limit(limit);
        }
        config
    }
}

/// Run the run subcommand: interpret the program against a fresh table
///
/// Program output goes to `out`. Returns the process exit code: 0 when
/// the program ran to completion, 1 when it failed at run time.
pub fn run(input: &Path, args: &RunArgs, out: &mut dyn Write) -> Result<i32> {
    let config = args.config();
    config.validate().map_err(|e| Error::Config {
        message: e.to_string(),
    })?;

    let source = read_source(input)?;
    let path = input.display().to_string();
    let module =
        compile_for(&source, config.capacity).map_err(|e| Error::compile(&path, &source, &e))?;
    let mut program = Program::lower(&module);
    let mut table = VariableTable::new(config).map_err(|e| Error::Config {
        message: e.to_string(),
    })?;

    let report = execute(&mut program, &mut table, out);
    if let Err(e) = &report.result {
        eprintln!("runtime error: {e}");
    }
    info!(
        "{path}: exit code {}, cleanup released {} slots",
        report.exit_code(),
        report.released
    );
    Ok(report.exit_code())
}
