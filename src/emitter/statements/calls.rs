//! Call lowering (§4.6): method dispatch (`ObjectInfo`-driven, with the
//! permissive `unknown`-class fallback of §7/§9), bare function calls,
//! and the map `put` special case.

use log::warn;

use crate::ast::{FunctionCallStmt, MethodCallStmt, Type, VarAssignMethodCallStmt, VarDeclMethodCallStmt};
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::emitter::expr::lower;
use crate::emitter::types::{declare, MAX_STRING_LENGTH};

pub fn emit_method_call(out: &mut String, level: usize, stmt: &MethodCallStmt, ctx: &EmitCtx<'_>) {
    if stmt.method == "put" && stmt.args.len() == 2 {
        if let Some((key_ty, value_ty)) = ctx.session.maps.get(&stmt.object).cloned() {
            emit_map_put(out, level, &stmt.object, &stmt.args[0].text, &stmt.args[1].text, &key_ty, &value_ty, ctx);
            return;
        }
    }

    let (class, receiver) = resolve_receiver(&stmt.object, ctx);
    let args = lower_call_args(&receiver, &stmt.args, ctx);
    emit_line!(out, level, "{class}_{}({});", stmt.method, args.join(", "));
}

/// `var name = obj.m(args)` / `Type name = obj.m(args)` (§3.2). A
/// string-returning method follows the same out-buffer convention as a
/// string-returning function (§4.6), with the receiver still passed first.
pub fn emit_var_decl_method_call(out: &mut String, level: usize, stmt: &VarDeclMethodCallStmt, ctx: &EmitCtx<'_>) {
    let (class, receiver) = resolve_receiver(&stmt.object, ctx);
    let returns_string = method_return_type(&class, &stmt.method, ctx).map(|t| t.is_string()).unwrap_or(false);

    if returns_string {
        emit_line!(out, level, "char {}[{MAX_STRING_LENGTH}];", stmt.name);
        let mut args = vec![receiver, stmt.name.clone()];
        args.extend(stmt.args.iter().map(|a| lower(a, ctx.resolver)));
        emit_line!(out, level, "{class}_{}({});", stmt.method, args.join(", "));
        return;
    }

    let ty = stmt
        .ty
        .clone()
        .or_else(|| method_return_type(&class, &stmt.method, ctx))
        .unwrap_or_else(|| Type::named("int"));
    let args = lower_call_args(&receiver, &stmt.args, ctx);
    emit_line!(out, level, "{} = {class}_{}({});", declare(&ty, &stmt.name, false, ctx.session), stmt.method, args.join(", "));
}

/// `reassign name = obj.m(args)` (§3.2): same receiver/dispatch
/// resolution as a declaration, minus the declarator.
pub fn emit_var_assign_method_call(out: &mut String, level: usize, stmt: &VarAssignMethodCallStmt, ctx: &EmitCtx<'_>) {
    let (class, receiver) = resolve_receiver(&stmt.object, ctx);
    let returns_string = method_return_type(&class, &stmt.method, ctx).map(|t| t.is_string()).unwrap_or(false);

    if returns_string {
        let mut args = vec![receiver, stmt.name.clone()];
        args.extend(stmt.args.iter().map(|a| lower(a, ctx.resolver)));
        emit_line!(out, level, "{class}_{}({});", stmt.method, args.join(", "));
    } else {
        let args = lower_call_args(&receiver, &stmt.args, ctx);
        emit_line!(out, level, "{} = {class}_{}({});", stmt.name, stmt.method, args.join(", "));
    }
}

pub fn emit_function_call(out: &mut String, level: usize, stmt: &FunctionCallStmt, ctx: &EmitCtx<'_>) {
    let args: Vec<String> = stmt.args.iter().map(|a| lower(a, ctx.resolver)).collect();
    emit_line!(out, level, "{}({});", stmt.name, args.join(", "));
}

fn lower_call_args(receiver: &str, args: &[crate::ast::Expression], ctx: &EmitCtx<'_>) -> Vec<String> {
    let mut out = vec![receiver.to_owned()];
    out.extend(args.iter().map(|a| lower(a, ctx.resolver)));
    out
}

fn method_return_type(class: &str, method: &str, ctx: &EmitCtx<'_>) -> Option<Type> {
    let info = ctx.session.classes.get(class)?;
    info.decl.methods.iter().find(|m| m.name == method).map(|m| m.return_type.clone())
}

/// Resolve a call receiver to (class name, lowered receiver text): `this`
/// inside a method resolves against the enclosing class; a tracked local
/// resolves against `ObjectInfo`; anything else degrades to the
/// `unknown` class with a diagnostic (§4.6, §7, §9 — a known weakness,
/// not a hard error, so compilation of the surrounding program continues).
fn resolve_receiver(object: &str, ctx: &EmitCtx<'_>) -> (String, String) {
    if object == "this" {
        if let Some(class) = &ctx.current_class {
            return (class.clone(), "this".to_owned());
        }
    }
    if let Some(class) = ctx.session.objects.get(object) {
        return (class.clone(), object.to_owned());
    }
    warn!("cannot determine the class of receiver '{object}'; emitting the call against a placeholder 'unknown' class");
    ("unknown".to_owned(), object.to_owned())
}

/// `obj.put(key, value)` against a tracked map (§4.6): linear search for
/// an existing key, update in place if found, else append while under
/// the 100-slot hard cap the spec's arrays are sized against.
fn emit_map_put(out: &mut String, level: usize, name: &str, key_arg: &str, value_arg: &str, key_ty: &Type, value_ty: &Type, ctx: &EmitCtx<'_>) {
    let key_arg = ctx.resolver.resolve_text(key_arg);
    let value_arg = ctx.resolver.resolve_text(value_arg);

    let key_eq = if key_ty.is_string() {
        format!("strcmp({name}_keys[_i], {key_arg}) == 0")
    } else {
        format!("{name}_keys[_i] == ({key_arg})")
    };
    let key_set = |idx: &str| -> String {
        if key_ty.is_string() {
            format!("strcpy({name}_keys[{idx}], {key_arg});")
        } else {
            format!("{name}_keys[{idx}] = {key_arg};")
        }
    };
    let value_set = |idx: &str| -> String {
        if value_ty.is_string() {
            format!("strcpy({name}_values[{idx}], {value_arg});")
        } else {
            format!("{name}_values[{idx}] = {value_arg};")
        }
    };

    emit_line!(out, level, "{{");
    emit_line!(out, level + 1, "int _i = 0;");
    emit_line!(out, level + 1, "int _found = 0;");
    emit_line!(out, level + 1, "for (; _i < {name}_size; _i++) {{ if ({key_eq}) {{ _found = 1; break; }} }}");
    emit_line!(out, level + 1, "if (_found) {{");
    emit_line!(out, level + 2, "{}", value_set("_i"));
    emit_line!(out, level + 1, "}} else if ({name}_size < 100) {{");
    emit_line!(out, level + 2, "{}", key_set(&format!("{name}_size")));
    emit_line!(out, level + 2, "{}", value_set(&format!("{name}_size")));
    emit_line!(out, level + 2, "{name}_size++;");
    emit_line!(out, level + 1, "}}");
    emit_line!(out, level, "}}");
}
