//! Class emission (§4.6): struct declaration/definition, the
//! constructor (`X_new`), and method-to-free-function lowering
//! (`X_m(X* this, ...)`).

use crate::ast::Method;
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::emitter::statements::emit_block;
use crate::emitter::types::{declare, scalar_c_type};
use crate::session::{ClassInfo, CompileSession};

pub fn emit_forward_decl(out: &mut String, name: &str) {
    emit_line!(out, 0, "struct {name};");
}

/// `typedef struct X X;` lets every other struct and prototype refer to
/// `X` by bare name, including class fields that are `ref` to their own
/// or a not-yet-defined sibling class (§9's forward-declaration note).
pub fn emit_typedef(out: &mut String, name: &str) {
    emit_line!(out, 0, "typedef struct {name} {name};");
}

pub fn emit_struct(out: &mut String, info: &ClassInfo, session: &CompileSession) {
    emit_line!(out, 0, "struct {} {{", info.decl.name);
    for (field_name, ty, is_ref) in &info.fields {
        emit_line!(out, 1, "{};", declare(ty, field_name, *is_ref, session));
    }
    emit_line!(out, 0, "}};");
}

pub fn emit_constructor_prototype(out: &mut String, info: &ClassInfo, session: &CompileSession) {
    emit_line!(out, 0, "{}* {}_new({});", info.decl.name, info.decl.name, constructor_params(info, session).join(", "));
}

fn constructor_params(info: &ClassInfo, session: &CompileSession) -> Vec<String> {
    info.decl
        .constructor
        .as_ref()
        .map(|c| c.params.iter().map(|p| declare(&p.ty, &p.name, p.is_ref, session)).collect())
        .unwrap_or_default()
}

pub fn emit_method_prototypes(out: &mut String, info: &ClassInfo, session: &CompileSession) {
    for method in &info.decl.methods {
        emit_line!(out, 0, "{};", method_signature(&info.decl.name, method, session));
    }
}

fn method_signature(class_name: &str, method: &Method, session: &CompileSession) -> String {
    let mut params = vec![format!("{class_name}* this")];
    if method.return_type.is_string() {
        params.push("char* _output_buffer".to_owned());
    }
    params.extend(method.params.iter().map(|p| declare(&p.ty, &p.name, p.is_ref, session)));
    let ret = if method.return_type.is_string() { "void".to_owned() } else { scalar_c_type(&method.return_type, session) };
    format!("{ret} {class_name}_{}({})", method.name, params.join(", "))
}

/// `X_new(params)`: allocate, zero-initialize every collected field by
/// its type default, copy each constructor parameter into its
/// like-named field (`strcpy` for string fields), then run the
/// constructor body's remaining field-init statements in source order
/// (§4.6). Parameters that are not also fields (there are none by
/// construction, since every param is collected as a field first, §4.6)
/// would otherwise be silently dropped; `collect_fields` guarantees that
/// doesn't happen.
pub fn emit_constructor(out: &mut String, info: &ClassInfo, ctx: &EmitCtx<'_>) {
    let name = &info.decl.name;
    let params = constructor_params(info, ctx.session);
    emit_line!(out, 0, "{name}* {name}_new({}) {{", params.join(", "));
    emit_line!(out, 1, "{name}* this = ({name}*)malloc(sizeof({name}));");
    for (field_name, ty, _) in &info.fields {
        emit_zero_init(out, 1, field_name, ty, ctx.session);
    }
    if let Some(constructor) = &info.decl.constructor {
        for param in &constructor.params {
            emit_param_copy(out, 1, &param.name, &param.ty);
        }
        let body_ctx = ctx.for_method(name, false);
        emit_block(out, 1, &constructor.body, &body_ctx);
    }
    emit_line!(out, 1, "return this;");
    emit_line!(out, 0, "}}");
}

fn emit_zero_init(out: &mut String, level: usize, field_name: &str, ty: &crate::ast::Type, session: &CompileSession) {
    if ty.is_string() {
        emit_line!(out, level, "this->{field_name}[0] = '\\0';");
    } else if matches!(ty, crate::ast::Type::Ref(_)) || session.classes.contains_key(&ty.to_string()) {
        emit_line!(out, level, "this->{field_name} = NULL;");
    } else {
        emit_line!(out, level, "this->{field_name} = 0;");
    }
}

fn emit_param_copy(out: &mut String, level: usize, param_name: &str, ty: &crate::ast::Type) {
    if ty.is_string() {
        emit_line!(out, level, "strcpy(this->{param_name}, {param_name});");
    } else {
        emit_line!(out, level, "this->{param_name} = {param_name};");
    }
}

pub fn emit_method(out: &mut String, class_name: &str, method: &Method, ctx: &EmitCtx<'_>) {
    emit_line!(out, 0, "{} {{", method_signature(class_name, method, ctx.session));
    let body_ctx = ctx.for_method(class_name, method.return_type.is_string());
    emit_block(out, 1, &method.body, &body_ctx);
    if !matches!(method.body.last(), Some(crate::ast::Statement::Return(_))) {
        if method.return_type.is_string() {
            // fall-through with no explicit return still needs the
            // out-buffer convention's bare `return;`
            emit_line!(out, 1, "return;");
        } else if !matches!(method.return_type, crate::ast::Type::Void) {
            emit_line!(out, 1, "return 0;");
        }
    }
    emit_line!(out, 0, "}}");
}
