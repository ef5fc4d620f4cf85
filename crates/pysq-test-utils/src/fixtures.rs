//! Failure-injecting fixtures.
//!
//! - [`FailingWriter`]: output sink that fails after N writes.
//! - [`LeakyBody`]: program body that declares slots and never frees them.
//! - [`FailingBody`]: program body that declares slots, then fails.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use pysq_core::PrimitiveType;
use pysq_runtime::{ProgramBody, VariableTable};

/// Accepts `succeed_count` writes, then fails every write and flush.
///
/// Successful writes are captured and can be inspected with
/// [`written`](FailingWriter::written).
pub struct FailingWriter {
    pub succeed_count: usize,
    call_count: AtomicUsize,
    buf: Vec<u8>,
}

impl FailingWriter {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
            buf: Vec::new(),
        }
    }

    /// How many times `write()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn written(&self) -> &[u8] {
        &self.buf
    }

    fn exhausted(&self) -> bool {
        self.calls() > self.succeed_count
    }
}

impl Write for FailingWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "deliberate write failure"));
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.exhausted() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "deliberate flush failure"));
        }
        Ok(())
    }
}

/// Declares `int` slots `0..count` and returns without freeing them.
pub struct LeakyBody {
    pub count: usize,
}

impl ProgramBody for LeakyBody {
    type Error = pysq_core::TableError;

    fn run(&mut self, table: &mut VariableTable, _out: &mut dyn Write) -> Result<(), Self::Error> {
        for index in 0..self.count {
            table.create_variable(index, PrimitiveType::Int.slot_size())?;
        }
        Ok(())
    }
}

/// Error returned by [`FailingBody`].
#[derive(Debug, PartialEq, Eq)]
pub struct DeliberateFailure {
    pub after: usize,
}

impl fmt::Display for DeliberateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deliberate failure after {} declarations", self.after)
    }
}

/// Declares `int` slots `0..count`, then fails.
pub struct FailingBody {
    pub count: usize,
}

impl ProgramBody for FailingBody {
    type Error = DeliberateFailure;

    fn run(&mut self, table: &mut VariableTable, _out: &mut dyn Write) -> Result<(), Self::Error> {
        for index in 0..self.count {
            if table
                .create_variable(index, PrimitiveType::Int.slot_size())
                .is_err()
            {
                break;
            }
        }
        Err(DeliberateFailure { after: self.count })
    }
}
