//! `obj.method(args)` as a standalone statement (§4.2 fallback #1), and the
//! shared shape-matcher used by declaration/assignment parsing to recognize
//! a right-hand side that is itself a method call.

use crate::ast::{MethodCallStmt, Statement};
use crate::error::CompileResult;
use crate::parser::expr::{expr, is_ident, split_top_level_dot};
use crate::parser::syntax::split_call;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn try_method_call_statement(
        &self,
        text: &str,
        line_no: usize,
    ) -> CompileResult<Option<Statement>> {
        let Some((object, method, args)) = self.parse_method_call_shape(text) else {
            return Ok(None);
        };
        let position = self.pos(line_no);
        Ok(Some(Statement::MethodCall(MethodCallStmt {
            object,
            method,
            args: args.iter().map(|a| expr(a, &self.file, line_no)).collect(),
            position,
        })))
    }

    /// Recognize `obj.method(args)` as a whole string, returning the
    /// receiver, method name, and raw (unparsed-further) argument texts.
    pub(crate) fn parse_method_call_shape(&self, text: &str) -> Option<(String, String, Vec<String>)> {
        let text = text.trim();
        let (head, call_part) = split_top_level_dot(text)?;
        let head = head.trim();
        if !is_ident(head) {
            return None;
        }
        let (method, args_text) = split_call(call_part)?;
        if !is_ident(&method) {
            return None;
        }
        Some((head.to_owned(), method, crate::parser::syntax::parse_args(&args_text)))
    }
}
