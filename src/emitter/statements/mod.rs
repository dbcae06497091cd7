//! Statement-kind dispatch (§4.6): one emitter submodule per family of
//! statement, fanned out from a single `match` over the AST's sum type.

pub mod calls;
pub mod control_flow;
pub mod declarations;
pub mod print_put;

use crate::ast::Statement;
use crate::emit_line;
use crate::emitter::context::EmitCtx;

/// Emit one statement's C lowering at `level`'s indentation. Class and
/// function *declarations* are not handled here: they are hoisted out
/// to their own top-level sections by the orchestrator (§4.6, output
/// order items 8-9) rather than emitted inline where they occur in the
/// source.
pub fn emit_statement(out: &mut String, level: usize, stmt: &Statement, ctx: &EmitCtx<'_>) {
    match stmt {
        Statement::Import(_) | Statement::ClassDecl(_) | Statement::TopLevelFuncDecl(_) => {}
        Statement::Print(p) => print_put::emit_print_put(out, level, p, true, ctx.resolver),
        Statement::Put(p) => print_put::emit_print_put(out, level, p, false, ctx.resolver),
        Statement::Sleep(e) => control_flow::emit_sleep(out, level, e, ctx),
        Statement::While(w) => control_flow::emit_while(out, level, w, ctx),
        Statement::For(f) => control_flow::emit_for(out, level, f, ctx),
        Statement::If(i) => control_flow::emit_if(out, level, i, ctx),
        Statement::Break(_) => emit_line!(out, level, "break;"),
        Statement::Continue(_) => emit_line!(out, level, "continue;"),
        Statement::VarDecl(v) => declarations::emit_var_decl(out, level, v, ctx),
        Statement::VarDeclInferred(v) => declarations::emit_var_decl_inferred(out, level, v, ctx),
        Statement::VarAssign(v) => declarations::emit_var_assign(out, level, v, ctx),
        Statement::ListDecl(l) => declarations::emit_list_decl(out, level, l, ctx),
        Statement::MapDecl(m) => declarations::emit_map_decl(out, level, m, ctx),
        Statement::ObjectDecl(o) => declarations::emit_object_decl(out, level, o, ctx),
        Statement::MethodCall(m) => calls::emit_method_call(out, level, m, ctx),
        Statement::VarDeclMethodCall(m) => calls::emit_var_decl_method_call(out, level, m, ctx),
        Statement::VarAssignMethodCall(m) => calls::emit_var_assign_method_call(out, level, m, ctx),
        Statement::FunctionCall(f) => calls::emit_function_call(out, level, f, ctx),
        Statement::Return(r) => control_flow::emit_return(out, level, r, ctx),
        Statement::Throw(e) => control_flow::emit_throw(out, level, e, ctx),
        Statement::TryCatch(t) => control_flow::emit_try_catch(out, level, t, ctx),
        Statement::RawCode { text, .. } => {
            for line in text.lines() {
                emit_line!(out, level, "{line}");
            }
        }
    }
}

pub fn emit_block(out: &mut String, level: usize, body: &[Statement], ctx: &EmitCtx<'_>) {
    for stmt in body {
        emit_statement(out, level, stmt, ctx);
    }
}
