//! `class Name: init(...): ... fn method(...): ...` (§4.2, §4.6).

use crate::ast::{ClassDecl, Constructor, Method, Statement, Visibility};
use crate::error::{CompileError, CompileResult};
use crate::parser::expr::{is_ident, require_colon};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_class(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("class").unwrap_or("").trim();
        self.parse_class_text(rest, idx, indent, false)
    }

    pub(crate) fn parse_class_text(
        &self,
        rest: &str,
        idx: usize,
        indent: usize,
        is_pub: bool,
    ) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let name = require_colon(rest, line.number)?.trim().to_owned();
        if !is_ident(&name) {
            return Err(CompileError::Syntax { line: line.number, message: format!("'{name}' is not a valid class name") });
        }
        let position = self.pos(line.number);

        let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
        if body_indent <= indent {
            return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
        }
        let (constructor, methods, next) = self.parse_class_body(idx + 1, body_indent)?;

        let visibility = if is_pub { Visibility::Public } else { Visibility::Private };
        Ok((Statement::ClassDecl(ClassDecl { name, constructor, methods, visibility, position }), next))
    }

    fn parse_class_body(
        &self,
        start: usize,
        indent: usize,
    ) -> CompileResult<(Option<Constructor>, Vec<Method>, usize)> {
        let mut constructor = None;
        let mut methods = vec![];
        let mut idx = start;

        loop {
            idx = self.skip_blank(idx);
            let Some(line) = self.lines.get(idx) else { break };
            let line_indent = line.indent();
            if line_indent < indent {
                break;
            }
            if line_indent > indent {
                return Err(CompileError::Indentation { line: line.number, expected: indent, got: line_indent });
            }

            match line.first_token() {
                Some("init") => {
                    if constructor.is_some() {
                        return Err(CompileError::Syntax {
                            line: line.number,
                            message: "class has more than one 'init'".to_owned(),
                        });
                    }
                    let rest = line.trimmed().strip_prefix("init").unwrap_or("").trim();
                    let header = self.parse_callable_header(rest, line.number, false)?;

                    let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
                    if body_indent <= indent {
                        return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
                    }
                    let (body, next) = self.parse_block(idx + 1, body_indent)?;
                    constructor = Some(Constructor { params: header.params, body, position: self.pos(line.number) });
                    idx = next;
                }
                Some("fn") => {
                    let rest = line.trimmed().strip_prefix("fn").unwrap_or("").trim();
                    let header = self.parse_callable_header(rest, line.number, true)?;

                    let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
                    if body_indent <= indent {
                        return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
                    }
                    let (body, next) = self.parse_block(idx + 1, body_indent)?;
                    methods.push(Method {
                        name: header.name,
                        params: header.params,
                        return_type: header.return_type,
                        body,
                        position: self.pos(line.number),
                    });
                    idx = next;
                }
                _ => {
                    return Err(CompileError::Syntax {
                        line: line.number,
                        message: "expected 'init' or 'fn' inside a class body".to_owned(),
                    });
                }
            }
        }

        Ok((constructor, methods, idx))
    }
}
