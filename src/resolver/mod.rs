//! Symbol resolver (§4.5).
//!
//! Two independent string-level rewrites over expression text, run in a
//! single left-to-right pass that tracks whether we're inside a double
//! quoted string (so neither rewrite ever touches string contents):
//!
//! 1. Type-cast sugar: `T(args)` -> `(T)(args)` for the primitive names
//!    `float|int|double|char`, when not itself a call to a same-named
//!    function.
//! 2. Module-qualified references: `M.S` -> `M_S` for every loaded
//!    module `M` and public member `S` of that module.
//!
//! Keeping both in one pass, rather than two independent string scans,
//! avoids the overlapping-responsibility trap the design notes call out
//! for the source's `this.` rewriting (§9).

use std::collections::HashSet;

use log::trace;

use crate::ast::{Expression, Type};
use crate::loader::ModuleInfo;

/// Every module member name a `resolve` call should flatten `M.S`
/// references against: the union of a module's public vars and classes
/// (§4.5 names only those two maps; functions are resolved separately
/// by the emitter via direct call-site qualification).
pub struct ResolverContext<'a> {
    modules: &'a [ModuleInfo],
}

impl<'a> ResolverContext<'a> {
    pub fn new(modules: &'a [ModuleInfo]) -> Self {
        Self { modules }
    }

    fn member_names(&self, module: &str) -> Option<HashSet<&str>> {
        let info = self.modules.iter().find(|m| m.name == module)?;
        let mut names: HashSet<&str> = info.vars.keys().map(String::as_str).collect();
        names.extend(info.classes.keys().map(String::as_str));
        Some(names)
    }

    fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }

    /// Rewrite `expr`'s text per §4.5 and return a new `Expression` with
    /// the same position.
    pub fn resolve(&self, expr: &Expression) -> Expression {
        let rewritten = self.resolve_text(&expr.text);
        Expression::new(rewritten, expr.position.clone())
    }

    pub fn resolve_text(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        let mut in_string = false;

        while i < chars.len() {
            let c = chars[i];

            if c == '"' {
                out.push(c);
                in_string = !in_string;
                i += 1;
                continue;
            }
            if in_string {
                out.push(c);
                i += 1;
                continue;
            }

            if let Some(consumed) = self.try_cast_sugar(&chars, i, &mut out) {
                i += consumed;
                continue;
            }
            if let Some(consumed) = self.try_module_qualified(&chars, i, &mut out) {
                i += consumed;
                continue;
            }

            out.push(c);
            i += 1;
        }

        out
    }

    /// `T(args)` -> `(T)(args)`, where `T` is a cast primitive and is
    /// not itself preceded by an identifier character (so `floatbuf(x)`
    /// is left alone). Returns the number of source characters consumed
    /// if a rewrite happened.
    fn try_cast_sugar(&self, chars: &[char], i: usize, out: &mut String) -> Option<usize> {
        for name in ["float", "int", "double", "char"] {
            let name_chars: Vec<char> = name.chars().collect();
            if !matches_at(chars, i, &name_chars) {
                continue;
            }
            if i > 0 && is_ident_char(chars[i - 1]) {
                continue;
            }
            let after_name = i + name_chars.len();
            if chars.get(after_name).copied().map(is_ident_char).unwrap_or(false) {
                continue;
            }
            let Some(&'(') = chars.get(after_name) else { continue };
            let Some(close) = find_matching_paren(chars, after_name) else { continue };

            trace!("resolver: rewriting cast sugar '{name}(...)' at offset {i}");
            out.push('(');
            out.push_str(name);
            out.push(')');
            out.push('(');
            out.extend(&chars[after_name + 1..close]);
            out.push(')');
            return Some(close + 1 - i);
        }
        None
    }

    /// `M.S` -> `M_S` for a known module `M` and one of its public
    /// members `S`, recognized wherever it appears in the text (not
    /// only when the whole string has that shape).
    fn try_module_qualified(&self, chars: &[char], i: usize, out: &mut String) -> Option<usize> {
        for module in self.module_names() {
            let module_chars: Vec<char> = module.chars().collect();
            if !matches_at(chars, i, &module_chars) {
                continue;
            }
            if i > 0 && is_ident_char(chars[i - 1]) {
                continue;
            }
            let dot_idx = i + module_chars.len();
            if chars.get(dot_idx) != Some(&'.') {
                continue;
            }

            let member_start = dot_idx + 1;
            let member_end = ident_end(chars, member_start);
            if member_end == member_start {
                continue;
            }
            let member: String = chars[member_start..member_end].iter().collect();

            let Some(members) = self.member_names(module) else { continue };
            if !members.contains(member.as_str()) {
                continue;
            }

            trace!("resolver: flattening '{module}.{member}' to '{module}_{member}'");
            out.push_str(module);
            out.push('_');
            out.push_str(&member);
            return Some(member_end - i);
        }
        None
    }
}

fn matches_at(chars: &[char], i: usize, needle: &[char]) -> bool {
    if needle.is_empty() || i + needle.len() > chars.len() {
        return false;
    }
    chars[i..i + needle.len()] == *needle
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn ident_end(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    i
}

fn find_matching_paren(chars: &[char], open: usize) -> Option<usize> {
    if chars.get(open) != Some(&'(') {
        return None;
    }
    let mut depth = 0i32;
    let mut in_string = false;
    for (idx, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Type inference heuristic for `VarDeclInferred` (§4.5), reusing the
/// `InferredType` enum rather than duplicating the rules: this is a
/// thin `Type` wrapper so emitter code can treat inferred declarations
/// uniformly with explicitly typed ones.
pub fn infer_declared_type(expr: &Expression) -> Type {
    use crate::ast::InferredType;
    match expr.infer_type() {
        InferredType::String => Type::named("string"),
        InferredType::Object => Type::named("object"),
        InferredType::Float => Type::named("float"),
        InferredType::Bool => Type::named("bool"),
        InferredType::Reference => Type::Ref(Box::new(Type::named("void"))),
        InferredType::Int => Type::named("int"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Position;
    use std::collections::HashMap;

    fn pos() -> Position {
        Position::new("t.scar", 1)
    }

    fn module(name: &str, vars: &[&str], classes: &[&str]) -> ModuleInfo {
        ModuleInfo {
            name: name.to_owned(),
            vars: vars.iter().map(|v| (v.to_string(), dummy_var())).collect(),
            classes: classes.iter().map(|c| (c.to_string(), dummy_class(c))).collect(),
            functions: HashMap::new(),
        }
    }

    fn dummy_var() -> crate::loader::PublicVar {
        crate::loader::PublicVar::Inferred(crate::ast::VarDeclInferredStmt {
            name: "x".into(),
            value: Expression::new("0", pos()),
            visibility: crate::ast::Visibility::Public,
            position: pos(),
        })
    }

    fn dummy_class(name: &str) -> crate::ast::ClassDecl {
        crate::ast::ClassDecl {
            name: name.to_owned(),
            constructor: None,
            methods: vec![],
            visibility: crate::ast::Visibility::Public,
            position: pos(),
        }
    }

    #[test]
    fn rewrites_cast_sugar() {
        let ctx = ResolverContext::new(&[]);
        assert_eq!(ctx.resolve_text("float(x + 1)"), "(float)(x + 1)");
    }

    #[test]
    fn does_not_rewrite_cast_inside_identifier() {
        let ctx = ResolverContext::new(&[]);
        assert_eq!(ctx.resolve_text("charcount(x)"), "charcount(x)");
    }

    #[test]
    fn flattens_module_qualified_var() {
        let modules = vec![module("shapes", &["sides"], &[])];
        let ctx = ResolverContext::new(&modules);
        assert_eq!(ctx.resolve_text("shapes.sides + 1"), "shapes_sides + 1");
    }

    #[test]
    fn flattens_module_qualified_class() {
        let modules = vec![module("animals", &[], &["Cat"])];
        let ctx = ResolverContext::new(&modules);
        assert_eq!(ctx.resolve_text("new animals.Cat()"), "new animals_Cat()");
    }

    #[test]
    fn leaves_unknown_qualification_alone() {
        let modules = vec![module("shapes", &["sides"], &[])];
        let ctx = ResolverContext::new(&modules);
        assert_eq!(ctx.resolve_text("other.sides"), "other.sides");
    }

    #[test]
    fn does_not_rewrite_inside_string_literals() {
        let modules = vec![module("shapes", &["sides"], &[])];
        let ctx = ResolverContext::new(&modules);
        assert_eq!(ctx.resolve_text("\"shapes.sides\""), "\"shapes.sides\"");
    }
}
