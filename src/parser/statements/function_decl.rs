//! Shared parameter-list / callable-header parsing (§4.2) for top-level
//! functions, methods, and constructors, plus `fn` dispatch for top-level
//! functions.

use crate::ast::{FunctionDecl, Parameter, Statement, Type, Visibility};
use crate::error::{CompileError, CompileResult};
use crate::parser::expr::require_colon;
use crate::parser::syntax::{find_matching_paren, split_top_level_commas};
use crate::parser::Parser;

/// `name(params) [-> Type]`, already stripped of its trailing `:`.
pub(crate) struct CallableHeader {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Type,
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_function(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("fn").unwrap_or("").trim();
        self.parse_function_text(rest, idx, indent, false)
    }

    pub(crate) fn parse_function_text(
        &self,
        rest: &str,
        idx: usize,
        indent: usize,
        is_pub: bool,
    ) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let header = self.parse_callable_header(rest, line.number, true)?;

        let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
        if body_indent <= indent {
            return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
        }
        let (body, next) = self.parse_block(idx + 1, body_indent)?;

        let visibility = if is_pub { Visibility::Public } else { Visibility::Private };
        Ok((
            Statement::TopLevelFuncDecl(FunctionDecl {
                name: header.name,
                params: header.params,
                return_type: header.return_type,
                body,
                visibility,
                position: self.pos(line.number),
            }),
            next,
        ))
    }

    /// Parse `name(params) [-> Type]:` (constructor headers pass
    /// `allow_return_type = false` since `init` never declares one).
    pub(crate) fn parse_callable_header(
        &self,
        text: &str,
        line_no: usize,
        allow_return_type: bool,
    ) -> CompileResult<CallableHeader> {
        let header = require_colon(text, line_no)?;

        let open = header.find('(').ok_or_else(|| CompileError::Syntax {
            line: line_no,
            message: "expected '(' in declaration header".to_owned(),
        })?;
        let close = find_matching_paren(header, open).ok_or_else(|| CompileError::Syntax {
            line: line_no,
            message: "unbalanced parentheses in declaration header".to_owned(),
        })?;

        let name = header[..open].trim().to_owned();
        let params_text = &header[open + 1..close];
        let trailer = header[close + 1..].trim();

        let return_type = if allow_return_type {
            if let Some(ret_text) = trailer.strip_prefix("->") {
                Type::parse(ret_text.trim()).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid return type '{}'", ret_text.trim()),
                })?
            } else {
                Type::Void
            }
        } else {
            Type::Void
        };

        let params = self.parse_param_list(params_text, line_no)?;
        Ok(CallableHeader { name, params, return_type })
    }

    pub(crate) fn parse_param_list(&self, text: &str, line_no: usize) -> CompileResult<Vec<Parameter>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(vec![]);
        }

        split_top_level_commas(text)
            .into_iter()
            .map(|param_text| self.parse_one_param(&param_text, line_no))
            .collect()
    }

    fn parse_one_param(&self, text: &str, line_no: usize) -> CompileResult<Parameter> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let position = self.pos(line_no);

        match tokens.as_slice() {
            ["ref", ty, name] => {
                let ty = Type::parse(ty).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid parameter type '{ty}'"),
                })?;
                Ok(Parameter { ty, name: (*name).to_owned(), is_ref: true, position })
            }
            [ty, name] => {
                let ty = Type::parse(ty).ok_or_else(|| CompileError::Syntax {
                    line: line_no,
                    message: format!("invalid parameter type '{ty}'"),
                })?;
                Ok(Parameter { ty, name: (*name).to_owned(), is_ref: false, position })
            }
            [name] => {
                // A bare identifier parameter defaults to type `int` (§4.2).
                Ok(Parameter { ty: Type::named("int"), name: (*name).to_owned(), is_ref: false, position })
            }
            _ => Err(CompileError::Syntax { line: line_no, message: format!("malformed parameter '{text}'") }),
        }
    }
}
