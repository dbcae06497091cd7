//! `var`/`reassign` keyword dispatch and the keyword-less declaration
//! fallback (§4.2), unified into one classifier: both surface forms
//! (`var Type name = value` and the bare `Type name = value` fallback)
//! collapse onto the same set of `Statement` variants depending on what the
//! right-hand side looks like (a `new` call, a method call, a bracket
//! literal, or a plain expression).

use crate::ast::{
    Expression, ListDeclStmt, MapDeclStmt, ObjectDeclStmt, Statement, Type, VarAssignMethodCallStmt,
    VarAssignStmt, VarDeclInferredStmt, VarDeclMethodCallStmt, VarDeclStmt, Visibility,
};
use crate::error::{CompileError, CompileResult};
use crate::parser::expr::{expr, is_ident, split_top_level_colon, split_top_level_eq};
use crate::parser::syntax::{parse_args, split_call, split_top_level_commas};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_var(&self, idx: usize, _indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("var").unwrap_or("").trim();
        self.parse_var_text(rest, idx, _indent, false)
    }

    pub(crate) fn parse_var_text(
        &self,
        rest: &str,
        idx: usize,
        _indent: usize,
        is_pub: bool,
    ) -> CompileResult<(Statement, usize)> {
        let line_no = self.lines[idx].number;
        let stmt = self.classify_decl(rest, line_no, true, is_pub)?;
        Ok((stmt, idx + 1))
    }

    pub(crate) fn parse_reassign(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("reassign").unwrap_or("").trim();
        let (lhs, rhs) = split_top_level_eq(rest).ok_or_else(|| CompileError::Syntax {
            line: line.number,
            message: "expected 'reassign name = value'".to_owned(),
        })?;
        let name = lhs.trim().to_owned();
        if !is_ident(&name) {
            return Err(CompileError::Syntax { line: line.number, message: format!("'{name}' is not a valid name") });
        }
        let rhs = rhs.trim();
        let position = self.pos(line.number);

        if let Some((object, method, args)) = self.parse_method_call_shape(rhs) {
            let args = args.iter().map(|a| expr(a, &self.file, line.number)).collect();
            return Ok((
                Statement::VarAssignMethodCall(VarAssignMethodCallStmt { name, object, method, args, position }),
                idx + 1,
            ));
        }

        Ok((
            Statement::VarAssign(VarAssignStmt { name, value: expr(rhs, &self.file, line.number), position }),
            idx + 1,
        ))
    }

    /// Fallback last resort of §4.2: a line with no dispatch keyword that
    /// still has a top-level `=` is a declaration (object construction,
    /// list/map literal, or plain typed declaration). Returns `Ok(None)`
    /// when there's no top-level `=` at all, so the caller can fall through
    /// to `UnknownStatement`.
    pub(crate) fn try_declaration_like(
        &self,
        text: &str,
        line_no: usize,
        is_pub: bool,
    ) -> CompileResult<Option<Statement>> {
        if split_top_level_eq(text).is_none() {
            return Ok(None);
        }
        self.classify_decl(text, line_no, false, is_pub).map(Some)
    }

    fn classify_decl(
        &self,
        text: &str,
        line_no: usize,
        allow_inferred: bool,
        is_pub: bool,
    ) -> CompileResult<Statement> {
        let (lhs, rhs) = split_top_level_eq(text).ok_or_else(|| CompileError::Syntax {
            line: line_no,
            message: "expected '=' in declaration".to_owned(),
        })?;
        let rhs = rhs.trim();
        let position = self.pos(line_no);
        let visibility = if is_pub { Visibility::Public } else { Visibility::Private };

        let mut tokens: Vec<&str> = lhs.split_whitespace().collect();
        let is_ref = if tokens.first() == Some(&"ref") {
            tokens.remove(0);
            true
        } else {
            false
        };

        let (ty_text, name): (Option<&str>, String) = match tokens.as_slice() {
            [ty, name] => (Some(*ty), (*name).to_owned()),
            [name] if allow_inferred && !is_ref => (None, (*name).to_owned()),
            _ => {
                return Err(CompileError::Syntax {
                    line: line_no,
                    message: format!("malformed declaration '{lhs}'"),
                })
            }
        };

        if let Some(ty) = ty_text {
            if let Some(elem_text) = ty.strip_prefix("list[").and_then(|s| s.strip_suffix(']')) {
                let elem_type = Type::parse(elem_text).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid list element type '{elem_text}'"),
                })?;
                let elements = parse_bracket_list(rhs, line_no)?
                    .into_iter()
                    .map(|e| expr(&e, &self.file, line_no))
                    .collect();
                return Ok(Statement::ListDecl(ListDeclStmt { elem_type, name, elements, visibility, position }));
            }
            if let Some(kv_text) = ty.strip_prefix("map[").and_then(|s| s.strip_suffix(']')) {
                let (key_text, value_text) = kv_text.split_once(':').ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid map type '{ty}'"),
                })?;
                let key_type = Type::parse(key_text).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid map key type '{key_text}'"),
                })?;
                let value_type = Type::parse(value_text).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid map value type '{value_text}'"),
                })?;
                let pairs = parse_bracket_map(rhs, line_no, &self.file)?;
                return Ok(Statement::MapDecl(MapDeclStmt { key_type, value_type, name, pairs, visibility, position }));
            }
        }

        if let Some(ctor_text) = rhs.strip_prefix("new ") {
            let (class_name, args_text) = split_call(ctor_text.trim()).ok_or_else(|| CompileError::Syntax {
                line: line_no,
                message: format!("malformed object construction '{rhs}'"),
            })?;
            let args = parse_args(&args_text).iter().map(|a| expr(a, &self.file, line_no)).collect();
            return Ok(Statement::ObjectDecl(ObjectDeclStmt { class_name, name, args, visibility, position }));
        }

        if let Some((object, method, args)) = self.parse_method_call_shape(rhs) {
            let ty = match ty_text {
                Some(t) => Some(Type::parse(t).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid type '{t}'"),
                })?),
                None => None,
            };
            let args = args.iter().map(|a| expr(a, &self.file, line_no)).collect();
            return Ok(Statement::VarDeclMethodCall(VarDeclMethodCallStmt {
                ty,
                name,
                object,
                method,
                args,
                visibility,
                position,
            }));
        }

        if let Some(ty) = ty_text {
            let ty = Type::parse(ty).ok_or_else(|| CompileError::Syntax {
                line: line_no,
                message: format!("invalid type '{ty}'"),
            })?;
            return Ok(Statement::VarDecl(VarDeclStmt {
                ty,
                name,
                value: expr(rhs, &self.file, line_no),
                is_ref,
                visibility,
                position,
            }));
        }

        Ok(Statement::VarDeclInferred(VarDeclInferredStmt {
            name,
            value: expr(rhs, &self.file, line_no),
            visibility,
            position,
        }))
    }
}

fn parse_bracket_list(rhs: &str, line_no: usize) -> CompileResult<Vec<String>> {
    let inner = strip_brackets(rhs, line_no)?;
    Ok(split_top_level_commas(inner))
}

fn parse_bracket_map(rhs: &str, line_no: usize, file: &str) -> CompileResult<Vec<(Expression, Expression)>> {
    let inner = strip_brackets(rhs, line_no)?;
    split_top_level_commas(inner)
        .into_iter()
        .map(|entry| {
            let (key, value) = split_top_level_colon(&entry).ok_or_else(|| CompileError::Syntax {
                line: line_no,
                message: format!("expected 'key:value' in map literal entry '{entry}'"),
            })?;
            Ok((expr(key, file, line_no), expr(value, file, line_no)))
        })
        .collect()
}

fn strip_brackets(rhs: &str, line_no: usize) -> CompileResult<&str> {
    let rhs = rhs.trim();
    rhs.strip_prefix('[').and_then(|s| s.strip_suffix(']')).ok_or_else(|| CompileError::Syntax {
        line: line_no,
        message: format!("expected a bracketed literal, got '{rhs}'"),
    })
}
