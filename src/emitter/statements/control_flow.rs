//! Control-flow lowering (§4.6): the loop/branch/exception forms all
//! lower to their direct C counterparts, except `try`/`catch`, which
//! needs a per-function-unique label pair, and `throw`, which needs to
//! know the innermost enclosing one.

use log::warn;

use crate::ast::{Expression, ForStmt, IfStmt, ReturnStmt, TryCatchStmt, WhileStmt};
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::emitter::expr::lower;
use crate::emitter::statements::emit_block;

pub fn emit_while(out: &mut String, level: usize, stmt: &WhileStmt, ctx: &EmitCtx<'_>) {
    emit_line!(out, level, "while ({}) {{", lower(&stmt.condition, ctx.resolver));
    emit_block(out, level + 1, &stmt.body, ctx);
    emit_line!(out, level, "}}");
}

/// `for v = a to b: body` -> `for (int v = a; v <= b; v++) { body }`, with
/// `#pragma omp parallel for` prepended for `parallel for` (§4.6). The
/// end expression is parenthesized if it looks like more than a bare
/// name or literal, since it's spliced unparsed into a `<=` comparison.
pub fn emit_for(out: &mut String, level: usize, stmt: &ForStmt, ctx: &EmitCtx<'_>) {
    if stmt.parallel {
        emit_line!(out, level, "#pragma omp parallel for");
    }
    let start = lower(&stmt.start, ctx.resolver);
    let end = lower(&stmt.end, ctx.resolver);
    let end = if contains_operator(&end) { format!("({end})") } else { end };
    let var = &stmt.var;
    emit_line!(out, level, "for (int {var} = {start}; {var} <= {end}; {var}++) {{");
    emit_block(out, level + 1, &stmt.body, ctx);
    emit_line!(out, level, "}}");
}

fn contains_operator(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '+' | '-' | '*' | '/' | '%' | '&' | '|' | '<' | '>' | '?' | ':'))
}

pub fn emit_if(out: &mut String, level: usize, stmt: &IfStmt, ctx: &EmitCtx<'_>) {
    emit_line!(out, level, "if ({}) {{", lower(&stmt.condition, ctx.resolver));
    emit_block(out, level + 1, &stmt.body, ctx);
    for elif in &stmt.elifs {
        emit_line!(out, level, "}} else if ({}) {{", lower(&elif.condition, ctx.resolver));
        emit_block(out, level + 1, &elif.body, ctx);
    }
    if let Some(else_body) = &stmt.else_body {
        emit_line!(out, level, "}} else {{");
        emit_block(out, level + 1, else_body, ctx);
    }
    emit_line!(out, level, "}}");
}

pub fn emit_return(out: &mut String, level: usize, stmt: &ReturnStmt, ctx: &EmitCtx<'_>) {
    match (&stmt.value, ctx.returns_string) {
        (None, _) => emit_line!(out, level, "return;"),
        (Some(value), true) => {
            emit_line!(out, level, "strcpy(_output_buffer, {});", lower(value, ctx.resolver));
            emit_line!(out, level, "return;");
        }
        (Some(value), false) => emit_line!(out, level, "return {};", lower(value, ctx.resolver)),
    }
}

/// `sleep E` has no source form in the spec's grammar tables beyond its
/// name; seconds-as-float into `usleep` is the natural reading given the
/// include prelude already carries `unistd.h` (§4.6 item 1).
pub fn emit_sleep(out: &mut String, level: usize, expr: &Expression, ctx: &EmitCtx<'_>) {
    emit_line!(out, level, "usleep((unsigned int)(({}) * 1000000));", lower(expr, ctx.resolver));
}

/// `try:`/`catch:` lowers to a block that saves/restores `_exception`,
/// jumping past the catch body on a clean run and into it otherwise
/// (§4.6). Label names are unique per emitted function, not globally:
/// `goto` targets are function-scoped in C, so that's all correctness needs.
pub fn emit_try_catch(out: &mut String, level: usize, stmt: &TryCatchStmt, ctx: &EmitCtx<'_>) {
    let label = ctx.push_catch_label();
    emit_line!(out, level, "{{");
    emit_line!(out, level + 1, "int _saved_exception_{label} = _exception;");
    emit_line!(out, level + 1, "_exception = 0;");
    emit_block(out, level + 1, &stmt.try_body, ctx);
    emit_line!(out, level + 1, "goto {label}_end;");
    emit_line!(out, level, "{label}:;");
    emit_block(out, level + 1, &stmt.catch_body, ctx);
    emit_line!(out, level, "{label}_end:;");
    emit_line!(out, level + 1, "_exception = _saved_exception_{label};");
    emit_line!(out, level, "}}");
    ctx.pop_catch_label();
}

/// `throw E` -> `_exception = E; goto catch_label;` (§4.6), jumping to
/// the innermost enclosing `try`. A `throw` with no enclosing `try` sets
/// the flag but has nowhere to jump to — a known weakness, logged rather
/// than silently dropped (§7, §9).
pub fn emit_throw(out: &mut String, level: usize, expr: &Expression, ctx: &EmitCtx<'_>) {
    let value = lower(expr, ctx.resolver);
    match ctx.current_catch_label() {
        Some(label) => {
            emit_line!(out, level, "_exception = {value};");
            emit_line!(out, level, "goto {label};");
        }
        None => {
            warn!("throw at {} has no enclosing try/catch; the exception flag is set but never observed", expr.position);
            emit_line!(out, level, "_exception = {value};");
        }
    }
}
