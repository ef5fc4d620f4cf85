//! Program entry point.
//!
//! A generated program is a [`ProgramBody`]: code that runs against a
//! variable table and writes to an output stream. [`execute`] runs the
//! body and then cleans up the table unconditionally, whether or not the
//! body succeeded, mirroring the `body; cleanup(); return 0;` shape of a
//! generated `main`.

use std::fmt;
use std::io::{self, Write};

use log::{debug, error};

use crate::config::{ConfigError, TableConfig};
use crate::table::VariableTable;

/// The injected program logic.
pub trait ProgramBody {
    /// Error the body can fail with.
    type Error: fmt::Display;

    /// Run the body.
    fn run(&mut self, table: &mut VariableTable, out: &mut dyn Write) -> Result<(), Self::Error>;
}

impl<F, E> ProgramBody for F
where
    F: FnMut(&mut VariableTable, &mut dyn Write) -> Result<(), E>,
    E: fmt::Display,
{
    type Error = E;

    fn run(&mut self, table: &mut VariableTable, out: &mut dyn Write) -> Result<(), E> {
        self(table, out)
    }
}

/// Outcome of one program execution.
#[derive(Debug)]
pub struct RunReport<E> {
    /// What the body returned.
    pub result: Result<(), E>,
    /// Number of slots still live after the body, released by cleanup.
    pub released: usize,
}

impl<E> RunReport<E> {
    /// Process exit code: 0 if the body succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.result {
            Ok(()) => 0,
            Err(_) => 1,
        }
    }

    /// Whether the body succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run `body`, then release every slot it left initialized.
pub fn execute<B>(
    body: &mut B,
    table: &mut VariableTable,
    out: &mut dyn Write,
) -> RunReport<B::Error>
where
    B: ProgramBody + ?Sized,
{
    let result = body.run(table, out);
    if let Err(e) = &result {
        error!("program body failed: {e}");
    }
    if let Err(e) = out.flush() {
        error!("failed to flush program output: {e}");
    }
    let released = table.cleanup();
    debug!("program finished, cleanup released {released} slots");
    RunReport { result, released }
}

/// Build a table from `config` and run `body` against standard output.
pub fn run<B>(config: TableConfig, mut body: B) -> Result<RunReport<B::Error>, ConfigError>
where
    B: ProgramBody,
{
    let mut table = VariableTable::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Ok(execute(&mut body, &mut table, &mut out))
}
