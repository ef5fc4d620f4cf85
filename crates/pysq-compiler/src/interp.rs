//! Interpreter: runs a lowered [`Program`] against a variable table.

use std::io::Write;

use pysq_runtime::{print_to, ProgramBody, VariableTable};

use crate::builtin::Builtin;
use crate::error::RuntimeError;
use crate::lower::{Instr, Operand, Program};

impl ProgramBody for Program {
    type Error = RuntimeError;

    fn run(&mut self, table: &mut VariableTable, out: &mut dyn Write) -> Result<(), RuntimeError> {
        for instr in &self.instrs {
            step(instr, table, out)?;
        }
        Ok(())
    }
}

fn step(instr: &Instr, table: &mut VariableTable, out: &mut dyn Write) -> Result<(), RuntimeError> {
    match instr {
        Instr::Alloc { id, size } => {
            table.create_variable(id.index(), *size)?;
        }
        Instr::Store { id, value } => {
            let v = eval(*value, table)?;
            table.write_int(id.index(), v)?;
        }
        Instr::Call { builtin, args } => match builtin {
            Builtin::Print => {
                for arg in args {
                    let v = eval(*arg, table)?;
                    print_to(out, v)?;
                }
            }
        },
        Instr::Eval(op) => {
            eval(*op, table)?;
        }
    }
    Ok(())
}

fn eval(op: Operand, table: &VariableTable) -> Result<i32, RuntimeError> {
    match op {
        Operand::Const(v) => Ok(v),
        Operand::Load(id) => Ok(table.read_int(id.index())?),
    }
}
