//! Abstract syntax tree.
//!
//! The parser resolves names while building the tree, so every variable
//! read and declaration already carries its slot and every call its
//! built-in.

use std::fmt::Write as _;

use crate::builtin::Builtin;
use crate::span::Span;
use crate::symbols::Variable;

/// An expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal.
    Int {
        /// The value.
        value: i32,
        /// Literal location.
        span: Span,
    },
    /// Read of a declared variable.
    VariableRead {
        /// Source name.
        name: String,
        /// The declaration the name resolved to.
        var: Variable,
        /// Name location.
        span: Span,
    },
    /// Call of a built-in.
    FunctionCall {
        /// The built-in being called.
        builtin: Builtin,
        /// Argument expressions, in order.
        args: Vec<Expr>,
        /// Function name location.
        span: Span,
    },
}

impl Expr {
    /// Location of the expression's leading token.
    pub fn span(&self) -> Span {
        match self {
            Self::Int { span, .. }
            | Self::VariableRead { span, .. }
            | Self::FunctionCall { span, .. } => *span,
        }
    }

    /// Whether evaluating the expression yields a value.
    pub fn has_value(&self) -> bool {
        match self {
            Self::Int { .. } | Self::VariableRead { .. } => true,
            Self::FunctionCall { builtin, .. } => builtin.returns_value(),
        }
    }
}

/// A top-level statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `name: type = value`: allocate a slot and store into it.
    Assignation {
        /// Source name.
        name: String,
        /// Slot and type of this declaration.
        var: Variable,
        /// Value stored into the slot.
        value: Expr,
        /// Name location.
        span: Span,
    },
    /// An expression evaluated for its effect.
    Expr(Expr),
}

/// The entry point: a whole compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    /// Statements in source order.
    pub statements: Vec<Stmt>,
    /// Number of table slots the program uses.
    pub slot_count: usize,
}

/// Render `module` as an indented tree, one node per line.
pub fn dump_ast(module: &Module) -> String {
    let mut out = String::from("Entrypoint\n");
    for stmt in &module.statements {
        match stmt {
            Stmt::Assignation {
                name, var, value, ..
            } => {
                line(&mut out, 1, &format!("Assignation({name}: {}, slot {})", var.ty, var.id));
                dump_expr(&mut out, value, 2);
            }
            Stmt::Expr(expr) => dump_expr(&mut out, expr, 1),
        }
    }
    out
}

fn dump_expr(out: &mut String, expr: &Expr, level: usize) {
    match expr {
        Expr::Int { value, .. } => line(out, level, &format!("Int({value})")),
        Expr::VariableRead { name, var, .. } => {
            line(out, level, &format!("VariableRead({name}, slot {})", var.id))
        }
        Expr::FunctionCall { builtin, args, .. } => {
            line(out, level, &format!("FunctionCall({builtin})"));
            for arg in args {
                dump_expr(out, arg, level + 1);
            }
        }
    }
}

fn line(out: &mut String, level: usize, text: &str) {
    let _ = writeln!(out, "{}-> {text}", "    ".repeat(level));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    #[test]
    fn empty_module_dumps_entrypoint_only() {
        assert_eq!(dump_ast(&Module::default()), "Entrypoint\n");
    }

    #[test]
    fn dump_nests_values_under_their_statement() {
        let module = compile("x: int = 5\nprint(x)").unwrap();
        assert_eq!(
            dump_ast(&module),
            "Entrypoint\n\
             \x20   -> Assignation(x: int, slot 0)\n\
             \x20       -> Int(5)\n\
             \x20   -> FunctionCall(print)\n\
             \x20       -> VariableRead(x, slot 0)\n"
        );
    }

    #[test]
    fn redeclaration_dumps_a_fresh_slot() {
        let module = compile("x: int = 1\nx: int = 2").unwrap();
        let dump = dump_ast(&module);
        assert!(dump.contains("Assignation(x: int, slot 0)"));
        assert!(dump.contains("Assignation(x: int, slot 1)"));
    }

    #[test]
    fn has_value_follows_builtin() {
        let module = compile("print(1)").unwrap();
        let Stmt::Expr(call) = &module.statements[0] else {
            panic!("expected expression statement");
        };
        assert!(!call.has_value());
        let Expr::FunctionCall { args, .. } = call else {
            panic!("expected call");
        };
        assert!(args[0].has_value());
        assert_eq!(args[0].span().column, 7);
    }
}
