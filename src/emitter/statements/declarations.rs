//! Declaration/assignment lowering (§4.6): scalar and string `var`
//! declarations, reassignment, list/map declarations, and object
//! construction.

use log::warn;

use crate::ast::{Expression, ListDeclStmt, MapDeclStmt, ObjectDeclStmt, Type, VarAssignStmt, VarDeclInferredStmt, VarDeclStmt};
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::emitter::expr::{lower, unquote};
use crate::emitter::types::{declare, scalar_c_type, MAX_STRING_LENGTH};
use crate::parser::syntax::split_call;
use crate::resolver::infer_declared_type;

/// A `this.x = …` statement parses as a `VarDecl`/`VarDeclInferred`, not
/// a `VarAssign` (§3.2's "field-init statements" in a constructor
/// body), but it names an already-collected struct field (§3.4), not a
/// fresh local: declaring `char this.name[256]` would both be invalid C
/// and shadow the real field. So a `this.`-prefixed name always lowers
/// as an assignment into the existing field, never a declaration.
pub fn emit_var_decl(out: &mut String, level: usize, stmt: &VarDeclStmt, ctx: &EmitCtx<'_>) {
    if stmt.name.starts_with("this.") {
        emit_field_init(out, level, &stmt.ty, &stmt.name, &stmt.value, ctx);
    } else {
        emit_typed_decl(out, level, &stmt.ty, &stmt.name, &stmt.value, stmt.is_ref, ctx);
    }
}

/// `VarDeclInferred`: the declared type comes from the literal-shape
/// heuristic (§4.5), then lowers exactly as an explicitly typed one would.
pub fn emit_var_decl_inferred(out: &mut String, level: usize, stmt: &VarDeclInferredStmt, ctx: &EmitCtx<'_>) {
    let ty = infer_declared_type(&stmt.value);
    if stmt.name.starts_with("this.") {
        emit_field_init(out, level, &ty, &stmt.name, &stmt.value, ctx);
    } else {
        emit_typed_decl(out, level, &ty, &stmt.name, &stmt.value, false, ctx);
    }
}

fn emit_typed_decl(out: &mut String, level: usize, ty: &Type, name: &str, value: &Expression, is_ref: bool, ctx: &EmitCtx<'_>) {
    if ty.is_string() {
        emit_string_init(out, level, name, value, ctx);
    } else {
        emit_line!(out, level, "{} = {};", declare(ty, name, is_ref, ctx.session), lower(value, ctx.resolver));
    }
}

/// Assignment-only lowering for a `this.x = …` field-init statement:
/// no declarator, just the value into the field the struct already has
/// (§3.4, §4.6). The `this.` -> `this->` rewrite happens later, in the
/// macro post-processor's single global pass (§4.7, §9).
fn emit_field_init(out: &mut String, level: usize, ty: &Type, name: &str, value: &Expression, ctx: &EmitCtx<'_>) {
    if ty.is_string() {
        if value.is_string_literal() {
            emit_line!(out, level, "strcpy({name}, \"{}\");", unquote(&value.text));
        } else if let Some(call) = string_returning_call(value, ctx) {
            emit_line!(out, level, "{}({name}, {});", call.0, call.1.join(", "));
        } else {
            emit_line!(out, level, "strcpy({name}, {});", lower(value, ctx.resolver));
        }
    } else {
        emit_line!(out, level, "{name} = {};", lower(value, ctx.resolver));
    }
}

/// A string's home is a fixed `char[256]` buffer (§4.6), which C cannot
/// assign via `=` after its declaration. A string literal can still be
/// given as a C array initializer, so that case skips `strcpy`
/// entirely; a call to a function known to return `string` uses the
/// out-buffer calling convention (§4.6) instead of assigning a result;
/// anything else (copying another string variable, or an opaque
/// expression we can't further classify) falls back to `strcpy`.
fn emit_string_init(out: &mut String, level: usize, name: &str, value: &Expression, ctx: &EmitCtx<'_>) {
    if value.is_string_literal() {
        emit_line!(out, level, "char {name}[{MAX_STRING_LENGTH}] = \"{}\";", unquote(&value.text));
        return;
    }
    emit_line!(out, level, "char {name}[{MAX_STRING_LENGTH}];");
    if let Some(call) = string_returning_call(value, ctx) {
        emit_line!(out, level, "{}({name}, {});", call.0, call.1.join(", "));
    } else {
        emit_line!(out, level, "strcpy({name}, {});", lower(value, ctx.resolver));
    }
}

/// If `value` is (textually) a call to a function known to return
/// `string`, return its out-buffer-convention name and lowered args.
fn string_returning_call(value: &Expression, ctx: &EmitCtx<'_>) -> Option<(String, Vec<String>)> {
    let (name, args_text) = split_call(value.text.trim())?;
    let info = ctx.session.functions.get(&name)?;
    if !info.decl.return_type.is_string() {
        return None;
    }
    let args = crate::parser::syntax::parse_args(&args_text)
        .into_iter()
        .map(|a| ctx.resolver.resolve_text(&a))
        .collect();
    Some((name, args))
}

/// Reassignment (§3.2). Without a full local symbol table we cannot
/// always tell a string-typed name from a scalar one; a string-literal
/// right-hand side is the one shape the opaque-expression model still
/// lets us recognize unambiguously, so only that case gets `strcpy`
/// (documented weakness, DESIGN.md). `this.x` targets are left as
/// written: the macro post-processor's single global `this.` -> `this->`
/// pass (§4.7, §9) covers assignment targets the same as any other
/// occurrence, rather than this emitter rewriting them a second time.
pub fn emit_var_assign(out: &mut String, level: usize, stmt: &VarAssignStmt, ctx: &EmitCtx<'_>) {
    let name = &stmt.name;
    if stmt.value.is_string_literal() {
        emit_line!(out, level, "strcpy({name}, \"{}\");", unquote(&stmt.value.text));
    } else {
        emit_line!(out, level, "{name} = {};", lower(&stmt.value, ctx.resolver));
    }
}

pub fn emit_list_decl(out: &mut String, level: usize, stmt: &ListDeclStmt, ctx: &EmitCtx<'_>) {
    let name = &stmt.name;
    let elem_c = scalar_c_type(&stmt.elem_type, ctx.session);
    if stmt.elem_type.is_string() {
        let values: Vec<String> = stmt.elements.iter().map(|e| format!("\"{}\"", unquote(&e.text))).collect();
        if values.is_empty() {
            emit_line!(out, level, "char {name}[1][{MAX_STRING_LENGTH}];");
        } else {
            emit_line!(out, level, "char {name}[{}][{MAX_STRING_LENGTH}] = {{{}}};", values.len(), values.join(", "));
        }
    } else {
        let values: Vec<String> = stmt.elements.iter().map(|e| lower(e, ctx.resolver)).collect();
        if values.is_empty() {
            emit_line!(out, level, "{elem_c} {name}[1];");
        } else {
            emit_line!(out, level, "{elem_c} {name}[{}] = {{{}}};", values.len(), values.join(", "));
        }
    }
    emit_line!(out, level, "int {name}_size = {};", stmt.elements.len());
}

/// Map lowering (§4.6): three parallel arrays plus a size counter.
/// `10` is the spec's literal fallback slot count for an empty map
/// literal; a non-empty one is sized to exactly its initial pair count.
pub fn emit_map_decl(out: &mut String, level: usize, stmt: &MapDeclStmt, ctx: &EmitCtx<'_>) {
    let name = &stmt.name;
    let capacity = if stmt.pairs.is_empty() { 10 } else { stmt.pairs.len() };

    emit_array_decl(out, level, name, "keys", &stmt.key_type, stmt.pairs.iter().map(|(k, _)| k), capacity, ctx);
    emit_array_decl(out, level, name, "values", &stmt.value_type, stmt.pairs.iter().map(|(_, v)| v), capacity, ctx);
    emit_line!(out, level, "int {name}_size = {};", stmt.pairs.len());
}

fn emit_array_decl<'a>(
    out: &mut String,
    level: usize,
    name: &str,
    suffix: &str,
    ty: &Type,
    values: impl Iterator<Item = &'a Expression>,
    capacity: usize,
    ctx: &EmitCtx<'_>,
) {
    if ty.is_string() {
        let values: Vec<String> = values.map(|e| format!("\"{}\"", unquote(&e.text))).collect();
        if values.is_empty() {
            emit_line!(out, level, "char {name}_{suffix}[{capacity}][{MAX_STRING_LENGTH}];");
        } else {
            emit_line!(out, level, "char {name}_{suffix}[{capacity}][{MAX_STRING_LENGTH}] = {{{}}};", values.join(", "));
        }
    } else {
        let c_ty = scalar_c_type(ty, ctx.session);
        let values: Vec<String> = values.map(|e| lower(e, ctx.resolver)).collect();
        if values.is_empty() {
            emit_line!(out, level, "{c_ty} {name}_{suffix}[{capacity}];");
        } else {
            emit_line!(out, level, "{c_ty} {name}_{suffix}[{capacity}] = {{{}}};", values.join(", "));
        }
    }
}

/// `Type name = new Class(args)` (§3.2) lowers to a constructor call
/// assigned straight to a pointer-typed local; `ObjectInfo`
/// registration already happened in the pre-walk (§3.4).
pub fn emit_object_decl(out: &mut String, level: usize, stmt: &ObjectDeclStmt, ctx: &EmitCtx<'_>) {
    if !ctx.session.classes.contains_key(&stmt.class_name) {
        warn!("object '{}' constructs unknown class '{}'", stmt.name, stmt.class_name);
    }
    let args: Vec<String> = stmt.args.iter().map(|a| lower(a, ctx.resolver)).collect();
    emit_line!(out, level, "{}* {} = {}_new({});", stmt.class_name, stmt.name, stmt.class_name, args.join(", "));
}
