//! `return`/`throw` (§3.2).

use crate::ast::{ReturnStmt, Statement};
use crate::error::CompileResult;
use crate::parser::expr::expr;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_return(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("return").unwrap_or("").trim();
        let value = if rest.is_empty() { None } else { Some(expr(rest, &self.file, line.number)) };
        Ok((Statement::Return(ReturnStmt { value, position: self.pos(line.number) }), idx + 1))
    }

    pub(crate) fn parse_throw(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("throw").unwrap_or("").trim();
        Ok((Statement::Throw(expr(rest, &self.file, line.number)), idx + 1))
    }
}
