//! C back end.
//!
//! Renders each statement as one C statement and splices the result into
//! the `main.c` template at the `// %main` marker. The generated program
//! calls the pysq-ffi C ABI, so the template supplies the cleanup call and
//! the `return (0);`.

use crate::ast::{Expr, Module, Stmt};

/// The default `main.c` template.
pub const MAIN_TEMPLATE: &str = include_str!("../templates/main.c");

/// Marker line the body replaces.
pub const BODY_MARKER: &str = "// %main";

const INDENT: &str = "    ";

/// Taken when a slot is still empty after `pysq_create_variable`: release
/// what was allocated so far and exit non-zero.
const ALLOC_FAILED: &str = "pysq_cleanup(NULL); return (1);";

/// Emit a full C translation unit for `module` using the default template.
pub fn emit_c(module: &Module) -> String {
    emit_c_with_template(module, MAIN_TEMPLATE)
}

/// Emit C for `module` into a caller-supplied template.
///
/// Every occurrence of [`BODY_MARKER`] is replaced by the body. A template
/// without the marker is returned unchanged.
pub fn emit_c_with_template(module: &Module, template: &str) -> String {
    let body = emit_body(module);
    template.replace(BODY_MARKER, &body)
}

/// Emit only the statement list, one statement per line, joined with the
/// template's body indentation.
pub fn emit_body(module: &Module) -> String {
    let lines: Vec<String> = module.statements.iter().map(statement).collect();
    if lines.is_empty() {
        return "// (empty program)".to_string();
    }
    lines.join(&format!("\n{INDENT}"))
}

fn statement(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Assignation { var, value, .. } => format!(
            "pysq_create_variable({id}, {size});\n{INDENT}\
             if (pysq_variable_ptr({id}) == NULL) {{ {bail} }}\n{INDENT}\
             {slot} = {value};",
            id = var.id,
            size = var.ty.slot_size(),
            bail = ALLOC_FAILED,
            slot = slot_lvalue(var.id.0),
            value = expr(value),
        ),
        Stmt::Expr(e) => format!("{};", expr(e)),
    }
}

fn expr(e: &Expr) -> String {
    match e {
        Expr::Int { value, .. } => int_literal(*value),
        Expr::VariableRead { var, .. } => format!("({})", slot_lvalue(var.id.0)),
        Expr::FunctionCall { builtin, args, .. } => {
            let args: Vec<String> = args.iter().map(expr).collect();
            format!("{}({})", builtin.c_symbol(), args.join(", "))
        }
    }
}

fn slot_lvalue(id: u32) -> String {
    format!("*((int*)pysq_variable_ptr({id}))")
}

// `-2147483648` is unary minus applied to a literal that does not fit in
// an int, so the minimum is spelled as an expression.
fn int_literal(value: i32) -> String {
    if value == i32::MIN {
        "(-2147483647 - 1)".to_string()
    } else if value < 0 {
        format!("({value})")
    } else {
        value.to_string()
    }
}
