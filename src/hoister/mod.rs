//! Function hoister (§4.4): reorders a top-level statement sequence so
//! every function declaration comes after the non-function statements, in
//! an order consistent with a topological sort of the call graph among
//! those functions.
//!
//! The call graph can't be read off a typed call-expression node — bodies
//! carry opaque expression text (§3.3) — so edges are found the same way
//! the emitter will eventually read them: by scanning every expression
//! string a function's body owns for an occurrence of another function's
//! name immediately followed by `(`.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::ast::{FunctionDecl, Statement};
use crate::error::{CompileError, CompileResult};

pub fn hoist(statements: Vec<Statement>) -> CompileResult<Vec<Statement>> {
    let mut non_functions = vec![];
    let mut functions: Vec<FunctionDecl> = vec![];
    for stmt in statements {
        match stmt {
            Statement::TopLevelFuncDecl(f) => functions.push(f),
            other => non_functions.push(other),
        }
    }

    let mut seen = HashSet::new();
    for f in &functions {
        if !seen.insert(f.name.clone()) {
            return Err(CompileError::DuplicateFunction { name: f.name.clone() });
        }
    }

    debug!("hoisting {} function declaration(s)", functions.len());
    let by_name: HashMap<&str, usize> =
        functions.iter().enumerate().map(|(i, f)| (f.name.as_str(), i)).collect();

    let edges: Vec<Vec<usize>> = functions
        .iter()
        .map(|f| {
            let mut texts = vec![];
            for stmt in &f.body {
                collect_expression_texts(stmt, &mut texts);
            }
            let mut callees: Vec<usize> = by_name
                .iter()
                .filter(|&(&name, _)| name != f.name && texts.iter().any(|t| calls_name(t, name)))
                .map(|(_, &idx)| idx)
                .collect();
            callees.sort_unstable();
            trace!("function '{}' calls {:?}", f.name, callees.iter().map(|&i| &functions[i].name).collect::<Vec<_>>());
            callees
        })
        .collect();

    let mut marks = vec![Mark::Unvisited; functions.len()];
    let mut order = vec![];
    let mut path = vec![];
    for i in 0..functions.len() {
        visit(i, &functions, &edges, &mut marks, &mut order, &mut path)?;
    }

    let mut result = non_functions;
    result.extend(order.into_iter().map(|i| Statement::TopLevelFuncDecl(functions[i].clone())));
    Ok(result)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first post-order visit with a temporary-mark stack: a back edge
/// (hitting a node still `InProgress`) is a cycle.
fn visit(
    i: usize,
    functions: &[FunctionDecl],
    edges: &[Vec<usize>],
    marks: &mut [Mark],
    order: &mut Vec<usize>,
    path: &mut Vec<usize>,
) -> CompileResult<()> {
    match marks[i] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            let start = path.iter().position(|&x| x == i).unwrap_or(0);
            let cycle = path[start..].iter().map(|&j| functions[j].name.clone()).collect();
            return Err(CompileError::CircularDependency { path: cycle });
        }
        Mark::Unvisited => {}
    }

    marks[i] = Mark::InProgress;
    path.push(i);
    for &next in &edges[i] {
        visit(next, functions, edges, marks, order, path)?;
    }
    path.pop();
    marks[i] = Mark::Done;
    order.push(i);
    Ok(())
}

/// Walk a statement and every nested statement (loop/if/try bodies) and
/// push the text of every expression it owns.
fn collect_expression_texts(stmt: &Statement, out: &mut Vec<String>) {
    match stmt {
        Statement::Import(_) | Statement::Break(_) | Statement::Continue(_) => {}
        Statement::Print(p) | Statement::Put(p) => out.extend(p.parts.iter().map(|e| e.text.clone())),
        Statement::Sleep(e) => out.push(e.text.clone()),
        Statement::While(w) => {
            out.push(w.condition.text.clone());
            w.body.iter().for_each(|s| collect_expression_texts(s, out));
        }
        Statement::For(f) => {
            out.push(f.start.text.clone());
            out.push(f.end.text.clone());
            f.body.iter().for_each(|s| collect_expression_texts(s, out));
        }
        Statement::If(i) => {
            out.push(i.condition.text.clone());
            i.body.iter().for_each(|s| collect_expression_texts(s, out));
            for elif in &i.elifs {
                out.push(elif.condition.text.clone());
                elif.body.iter().for_each(|s| collect_expression_texts(s, out));
            }
            if let Some(else_body) = &i.else_body {
                else_body.iter().for_each(|s| collect_expression_texts(s, out));
            }
        }
        Statement::VarDecl(v) => out.push(v.value.text.clone()),
        Statement::VarDeclInferred(v) => out.push(v.value.text.clone()),
        Statement::VarAssign(v) => out.push(v.value.text.clone()),
        Statement::ListDecl(l) => out.extend(l.elements.iter().map(|e| e.text.clone())),
        Statement::MapDecl(m) => {
            for (k, v) in &m.pairs {
                out.push(k.text.clone());
                out.push(v.text.clone());
            }
        }
        // Classes are a separate scope; the hoister only orders top-level
        // functions relative to each other.
        Statement::ClassDecl(_) => {}
        Statement::ObjectDecl(o) => out.extend(o.args.iter().map(|e| e.text.clone())),
        Statement::MethodCall(m) => out.extend(m.args.iter().map(|e| e.text.clone())),
        Statement::VarDeclMethodCall(m) => out.extend(m.args.iter().map(|e| e.text.clone())),
        Statement::VarAssignMethodCall(m) => out.extend(m.args.iter().map(|e| e.text.clone())),
        Statement::FunctionCall(f) => {
            out.push(f.name.clone());
            out.extend(f.args.iter().map(|e| e.text.clone()));
        }
        Statement::TopLevelFuncDecl(_) => {}
        Statement::Return(r) => {
            if let Some(v) = &r.value {
                out.push(v.text.clone());
            }
        }
        Statement::Throw(e) => out.push(e.text.clone()),
        Statement::TryCatch(t) => {
            t.try_body.iter().for_each(|s| collect_expression_texts(s, out));
            t.catch_body.iter().for_each(|s| collect_expression_texts(s, out));
        }
        Statement::RawCode { text, .. } => out.push(text.clone()),
    }
}

/// Whether `text` contains `name` as a whole identifier immediately (modulo
/// whitespace) followed by `(` — i.e. a call to `name`.
fn calls_name(text: &str, name: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = name.chars().collect();
    if needle.is_empty() || needle.len() > chars.len() {
        return false;
    }

    for i in 0..=chars.len() - needle.len() {
        if chars[i..i + needle.len()] != needle[..] {
            continue;
        }
        let before_ok = i == 0 || !is_ident_char(chars[i - 1]);
        let after_ident = chars.get(i + needle.len()).copied().map(is_ident_char).unwrap_or(false);
        if after_ident || !before_ok {
            continue;
        }
        let mut j = i + needle.len();
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if chars.get(j) == Some(&'(') {
            return true;
        }
    }
    false
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, FunctionCallStmt, Position, ReturnStmt, Type, Visibility};

    fn pos() -> Position {
        Position::new("t.scar", 1)
    }

    fn func(name: &str, calls: &[&str]) -> FunctionDecl {
        let body = calls
            .iter()
            .map(|callee| {
                Statement::FunctionCall(FunctionCallStmt {
                    name: (*callee).to_owned(),
                    args: vec![],
                    position: pos(),
                })
            })
            .collect();
        FunctionDecl {
            name: name.to_owned(),
            params: vec![],
            return_type: Type::Void,
            body,
            visibility: Visibility::Private,
            position: pos(),
        }
    }

    fn names(statements: &[Statement]) -> Vec<&str> {
        statements
            .iter()
            .filter_map(|s| match s {
                Statement::TopLevelFuncDecl(f) => Some(f.name.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn callees_precede_callers() {
        let statements = vec![
            Statement::TopLevelFuncDecl(func("main", &["calculate"])),
            Statement::TopLevelFuncDecl(func("calculate", &[])),
        ];
        let hoisted = hoist(statements).unwrap();
        assert_eq!(names(&hoisted), vec!["calculate", "main"]);
    }

    #[test]
    fn non_function_statements_keep_their_relative_order() {
        let print = Statement::Throw(Expression::new("1", pos()));
        let ret = Statement::Return(ReturnStmt { value: None, position: pos() });
        let statements = vec![
            print.clone(),
            ret.clone(),
            Statement::TopLevelFuncDecl(func("f", &[])),
        ];
        let hoisted = hoist(statements).unwrap();
        assert_eq!(hoisted[0], print);
        assert_eq!(hoisted[1], ret);
    }

    #[test]
    fn detects_cycles() {
        let statements = vec![
            Statement::TopLevelFuncDecl(func("a", &["b"])),
            Statement::TopLevelFuncDecl(func("b", &["a"])),
        ];
        assert!(matches!(hoist(statements), Err(CompileError::CircularDependency { .. })));
    }

    #[test]
    fn rejects_duplicate_function_names() {
        let statements = vec![
            Statement::TopLevelFuncDecl(func("f", &[])),
            Statement::TopLevelFuncDecl(func("f", &[])),
        ];
        assert!(matches!(hoist(statements), Err(CompileError::DuplicateFunction { .. })));
    }

    #[test]
    fn self_edges_are_dropped() {
        let statements = vec![Statement::TopLevelFuncDecl(func("f", &["f"]))];
        assert_eq!(names(&hoist(statements).unwrap()), vec!["f"]);
    }
}
