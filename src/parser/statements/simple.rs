//! `sleep`, `break`, `continue`, and the bare-function-call fallback.

use crate::ast::{FunctionCallStmt, Statement};
use crate::error::CompileResult;
use crate::parser::expr::{expr, is_ident};
use crate::parser::syntax::{parse_args, split_call};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_sleep(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("sleep").unwrap_or("").trim();
        Ok((Statement::Sleep(expr(rest, &self.file, line.number)), idx + 1))
    }

    /// Fallback #2: a bare `name(args)` call with no receiver.
    pub(crate) fn try_bare_function_call(
        &self,
        text: &str,
        line_no: usize,
    ) -> CompileResult<Option<Statement>> {
        let Some((head, args_text)) = split_call(text) else {
            return Ok(None);
        };
        if !is_ident(&head) {
            return Ok(None);
        }
        let args = parse_args(&args_text).iter().map(|a| expr(a, &self.file, line_no)).collect();
        Ok(Some(Statement::FunctionCall(FunctionCallStmt { name: head, args, position: self.pos(line_no) })))
    }
}
