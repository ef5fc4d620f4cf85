//! Lowering: resolved syntax tree to a flat instruction list.

use std::fmt;

use pysq_core::VariableId;
use smallvec::SmallVec;

use crate::ast::{Expr, Module, Stmt};
use crate::builtin::Builtin;

/// A value-producing operand. Calls never appear here: no built-in that
/// returns a value exists, so arguments are always constants or loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// An immediate int.
    Const(i32),
    /// Read the int stored in a slot.
    Load(VariableId),
}

/// One runtime step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instr {
    /// `create_variable(id, size)`.
    Alloc {
        /// Target slot.
        id: VariableId,
        /// Bytes to allocate.
        size: usize,
    },
    /// Store an int into a slot.
    Store {
        /// Target slot.
        id: VariableId,
        /// Value to store.
        value: Operand,
    },
    /// Call a built-in.
    Call {
        /// The built-in.
        builtin: Builtin,
        /// Evaluated arguments.
        args: SmallVec<[Operand; 2]>,
    },
    /// Evaluate an operand and discard it.
    Eval(Operand),
}

/// A lowered program, ready for the interpreter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instructions in execution order.
    pub instrs: Vec<Instr>,
    /// Number of table slots the program uses.
    pub slot_count: usize,
}

impl Program {
    /// Lower a parsed module.
    pub fn lower(module: &Module) -> Self {
        let mut instrs = Vec::with_capacity(module.statements.len() * 2);
        for stmt in &module.statements {
            match stmt {
                Stmt::Assignation { var, value, .. } => {
                    instrs.push(Instr::Alloc {
                        id: var.id,
                        size: var.ty.slot_size(),
                    });
                    instrs.push(Instr::Store {
                        id: var.id,
                        value: operand(value),
                    });
                }
                Stmt::Expr(Expr::FunctionCall { builtin, args, .. }) => {
                    instrs.push(Instr::Call {
                        builtin: *builtin,
                        args: args.iter().map(operand).collect(),
                    });
                }
                Stmt::Expr(expr) => instrs.push(Instr::Eval(operand(expr))),
            }
        }
        Self {
            instrs,
            slot_count: module.slot_count,
        }
    }
}

// The parser rejects valueless calls in operand position, so the call arm
// is unreachable for checked modules; it evaluates to 0 rather than panic.
fn operand(expr: &Expr) -> Operand {
    match expr {
        Expr::Int { value, .. } => Operand::Const(*value),
        Expr::VariableRead { var, .. } => Operand::Load(var.id),
        Expr::FunctionCall { .. } => Operand::Const(0),
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(v) => write!(f, "{v}"),
            Self::Load(id) => write!(f, "[{id}]"),
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc { id, size } => write!(f, "alloc [{id}], {size}"),
            Self::Store { id, value } => write!(f, "store [{id}], {value}"),
            Self::Call { builtin, args } => {
                write!(f, "call {builtin}")?;
                for (i, arg) in args.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{arg}")?;
                }
                Ok(())
            }
            Self::Eval(op) => write!(f, "eval {op}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instrs {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}
