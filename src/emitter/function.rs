//! Top-level function emission (§4.6): prototypes and bodies, including
//! the string-return out-buffer convention shared with methods.

use crate::ast::{FunctionDecl, Statement, Type};
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::emitter::statements::emit_block;
use crate::emitter::types::{declare, scalar_c_type};
use crate::session::CompileSession;

pub fn emit_prototype(out: &mut String, function: &FunctionDecl, session: &CompileSession) {
    emit_line!(out, 0, "{};", signature(function, session));
}

fn signature(function: &FunctionDecl, session: &CompileSession) -> String {
    let mut params = vec![];
    if function.return_type.is_string() {
        params.push("char* _output_buffer".to_owned());
    }
    params.extend(function.params.iter().map(|p| declare(&p.ty, &p.name, p.is_ref, session)));
    let ret = if function.return_type.is_string() { "void".to_owned() } else { scalar_c_type(&function.return_type, session) };
    format!("{ret} {}({})", function.name, params.join(", "))
}

/// A function whose declared return type is `string` lowers to a `void`
/// function with a leading output-buffer parameter; every `return E`
/// inside its body is rewritten by the statement emitter's `returns_string`
/// flag to `strcpy(_output_buffer, E); return;` (§4.6).
pub fn emit_function(out: &mut String, function: &FunctionDecl, ctx: &EmitCtx<'_>) {
    emit_line!(out, 0, "{} {{", signature(function, ctx.session));
    let body_ctx = ctx.for_function(function.return_type.is_string());
    emit_block(out, 1, &function.body, &body_ctx);
    if !matches!(function.body.last(), Some(Statement::Return(_))) {
        if function.return_type.is_string() {
            emit_line!(out, 1, "return;");
        } else if !matches!(function.return_type, Type::Void) {
            emit_line!(out, 1, "return 0;");
        }
    }
    emit_line!(out, 0, "}}");
}
