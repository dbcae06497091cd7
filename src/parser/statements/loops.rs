//! `while`, `for`, and `parallel for` (§4.2, §4.6).

use crate::ast::{ForStmt, Statement, WhileStmt};
use crate::error::{CompileError, CompileResult};
use crate::parser::expr::{expr, is_ident, require_colon};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_while(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let header = line.trimmed().strip_prefix("while").unwrap_or("").trim();
        let condition_text = require_colon(header, line.number)?;
        let condition = expr(condition_text, &self.file, line.number);

        let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
        if body_indent <= indent {
            return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
        }
        let (body, next) = self.parse_block(idx + 1, body_indent)?;

        Ok((Statement::While(WhileStmt { condition, body, position: self.pos(line.number) }), next))
    }

    pub(crate) fn parse_for(
        &self,
        idx: usize,
        indent: usize,
        parallel: bool,
    ) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let header = line.trimmed().strip_prefix("for").unwrap_or("").trim();
        self.parse_for_header(header, idx, indent, parallel)
    }

    fn parse_for_header(
        &self,
        header: &str,
        idx: usize,
        indent: usize,
        parallel: bool,
    ) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let header = require_colon(header, line.number)?;

        let (lhs, rhs) = header.split_once('=').ok_or_else(|| CompileError::Syntax {
            line: line.number,
            message: "expected 'for v = a to b:'".to_owned(),
        })?;
        let var = lhs.trim().to_owned();
        if !is_ident(&var) {
            return Err(CompileError::Syntax { line: line.number, message: format!("'{var}' is not a valid loop variable") });
        }
        let (start_text, end_text) = rhs.split_once(" to ").ok_or_else(|| CompileError::Syntax {
            line: line.number,
            message: "expected 'for v = a to b:'".to_owned(),
        })?;

        let start = expr(start_text, &self.file, line.number);
        let end = expr(end_text, &self.file, line.number);

        let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
        if body_indent <= indent {
            return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
        }
        let (body, next) = self.parse_block(idx + 1, body_indent)?;

        Ok((
            Statement::For(ForStmt { var, start, end, body, parallel, position: self.pos(line.number) }),
            next,
        ))
    }

    pub(crate) fn parse_parallel_for(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("parallel").unwrap_or("").trim_start();
        let Some(header) = rest.strip_prefix("for") else {
            return Err(CompileError::Syntax { line: line.number, message: "'parallel' must be followed by 'for'".to_owned() });
        };
        self.parse_for_header(header.trim(), idx, indent, true)
    }
}
