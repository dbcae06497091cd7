//! Top-level *exported* declaration lowering (§4.6 output-order item
//! 7): a `pub` top-level declaration is the one case where "declare it
//! where it's used" (as `main` would for a private one, like any other
//! local) doesn't work — a `pub` name must stay resolvable as `M_S`
//! from whatever other module or function references it (§4.5), so it
//! needs real top-level C scope, assigned by an `init_<name>` function
//! `main` calls before running the program's own statements. A
//! private (non-`pub`) top-level declaration is not given this
//! treatment: it lowers exactly like a local one, inline in `main`, in
//! source order — matching the concrete emitted-output scenarios (§8),
//! which show object/map/var declarations appearing directly in
//! `main` with their ordinary local form.

use crate::ast::{Expression, Program, Statement, Type, VarAssignMethodCallStmt};
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::emitter::expr::{lower, unquote};
use crate::emitter::statements::calls::emit_var_assign_method_call;
use crate::emitter::types::{declare, scalar_c_type, MAX_STRING_LENGTH};
use crate::resolver::infer_declared_type;

/// Emit every top-level declaration's bare global, then every matching
/// `init_<name>` function. Returns the init function names in source
/// order, for `main` to call up front (§4.6 output-order item 10).
pub fn emit_globals(out: &mut String, program: &Program, ctx: &EmitCtx<'_>) -> Vec<String> {
    let exported: Vec<&Statement> = program.statements.iter().filter(|s| s.is_public() && declared_name(s).is_some()).collect();

    let mut names = vec![];
    for statement in &exported {
        if let Some(name) = emit_global_decl(out, statement, ctx) {
            names.push(name);
        }
    }
    out.push('\n');

    for statement in &exported {
        let name = declared_name(statement).expect("filtered above");
        emit_line!(out, 0, "static void init_{name}(void) {{");
        emit_global_init(out, statement, ctx);
        emit_line!(out, 0, "}}");
    }
    out.push('\n');

    names
}

/// Whether this top-level statement was lifted to a real C global by
/// `emit_globals` (and so must be skipped, not re-emitted, when `main`
/// walks the program's statements).
pub fn is_exported_declaration(statement: &Statement) -> bool {
    statement.is_public() && declared_name(statement).is_some()
}

fn declared_name(statement: &Statement) -> Option<&str> {
    match statement {
        Statement::VarDecl(v) => Some(&v.name),
        Statement::VarDeclInferred(v) => Some(&v.name),
        Statement::ListDecl(l) => Some(&l.name),
        Statement::MapDecl(m) => Some(&m.name),
        Statement::ObjectDecl(o) => Some(&o.name),
        Statement::VarDeclMethodCall(m) => Some(&m.name),
        _ => None,
    }
}

fn emit_global_decl(out: &mut String, statement: &Statement, ctx: &EmitCtx<'_>) -> Option<String> {
    match statement {
        Statement::VarDecl(v) => {
            emit_line!(out, 0, "{};", declare(&v.ty, &v.name, v.is_ref, ctx.session));
            Some(v.name.clone())
        }
        Statement::VarDeclInferred(v) => {
            let ty = infer_declared_type(&v.value);
            emit_line!(out, 0, "{};", declare(&ty, &v.name, false, ctx.session));
            Some(v.name.clone())
        }
        Statement::ListDecl(l) => {
            let count = l.elements.len().max(1);
            if l.elem_type.is_string() {
                emit_line!(out, 0, "char {}[{count}][{MAX_STRING_LENGTH}];", l.name);
            } else {
                emit_line!(out, 0, "{} {}[{count}];", scalar_c_type(&l.elem_type, ctx.session), l.name);
            }
            emit_line!(out, 0, "int {}_size;", l.name);
            Some(l.name.clone())
        }
        Statement::MapDecl(m) => {
            let capacity = if m.pairs.is_empty() { 10 } else { m.pairs.len() };
            emit_global_map_array(out, &m.name, "keys", &m.key_type, capacity, ctx);
            emit_global_map_array(out, &m.name, "values", &m.value_type, capacity, ctx);
            emit_line!(out, 0, "int {}_size;", m.name);
            Some(m.name.clone())
        }
        Statement::ObjectDecl(o) => {
            emit_line!(out, 0, "{}* {};", o.class_name, o.name);
            Some(o.name.clone())
        }
        Statement::VarDeclMethodCall(m) => {
            let ty = m.ty.clone().unwrap_or_else(|| Type::named("int"));
            emit_line!(out, 0, "{};", declare(&ty, &m.name, false, ctx.session));
            Some(m.name.clone())
        }
        _ => None,
    }
}

fn emit_global_map_array(out: &mut String, name: &str, suffix: &str, ty: &Type, capacity: usize, ctx: &EmitCtx<'_>) {
    if ty.is_string() {
        emit_line!(out, 0, "char {name}_{suffix}[{capacity}][{MAX_STRING_LENGTH}];");
    } else {
        emit_line!(out, 0, "{} {name}_{suffix}[{capacity}];", scalar_c_type(ty, ctx.session));
    }
}

fn emit_global_init(out: &mut String, statement: &Statement, ctx: &EmitCtx<'_>) {
    match statement {
        Statement::VarDecl(v) => emit_scalar_init(out, &v.ty, &v.name, &v.value, ctx),
        Statement::VarDeclInferred(v) => {
            let ty = infer_declared_type(&v.value);
            emit_scalar_init(out, &ty, &v.name, &v.value, ctx);
        }
        Statement::ListDecl(l) => {
            emit_line!(out, 1, "{}_size = {};", l.name, l.elements.len());
            for (i, elem) in l.elements.iter().enumerate() {
                if l.elem_type.is_string() {
                    emit_line!(out, 1, "strcpy({}[{i}], \"{}\");", l.name, unquote(&elem.text));
                } else {
                    emit_line!(out, 1, "{}[{i}] = {};", l.name, lower(elem, ctx.resolver));
                }
            }
        }
        Statement::MapDecl(m) => {
            emit_line!(out, 1, "{}_size = {};", m.name, m.pairs.len());
            for (i, (key, value)) in m.pairs.iter().enumerate() {
                emit_pair_entry(out, &m.name, "keys", &m.key_type, i, key, ctx);
                emit_pair_entry(out, &m.name, "values", &m.value_type, i, value, ctx);
            }
        }
        Statement::ObjectDecl(o) => {
            let args: Vec<String> = o.args.iter().map(|a| lower(a, ctx.resolver)).collect();
            emit_line!(out, 1, "{} = {}_new({});", o.name, o.class_name, args.join(", "));
        }
        Statement::VarDeclMethodCall(m) => {
            let as_assign = VarAssignMethodCallStmt {
                name: m.name.clone(),
                object: m.object.clone(),
                method: m.method.clone(),
                args: m.args.clone(),
                position: m.position.clone(),
            };
            emit_var_assign_method_call(out, 1, &as_assign, ctx);
        }
        _ => {}
    }
}

fn emit_pair_entry(out: &mut String, map_name: &str, suffix: &str, ty: &Type, index: usize, value: &Expression, ctx: &EmitCtx<'_>) {
    if ty.is_string() {
        emit_line!(out, 1, "strcpy({map_name}_{suffix}[{index}], \"{}\");", unquote(&value.text));
    } else {
        emit_line!(out, 1, "{map_name}_{suffix}[{index}] = {};", lower(value, ctx.resolver));
    }
}

fn emit_scalar_init(out: &mut String, ty: &Type, name: &str, value: &Expression, ctx: &EmitCtx<'_>) {
    if ty.is_string() {
        if value.is_string_literal() {
            emit_line!(out, 1, "strcpy({name}, \"{}\");", unquote(&value.text));
        } else {
            emit_line!(out, 1, "strcpy({name}, {});", lower(value, ctx.resolver));
        }
    } else {
        emit_line!(out, 1, "{name} = {};", lower(value, ctx.resolver));
    }
}
