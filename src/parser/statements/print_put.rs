//! `print`/`put` (§3.2): a literal, or a format string followed by the
//! comma-separated expressions it interpolates.

use crate::ast::{PrintStmt, Statement};
use crate::error::CompileResult;
use crate::parser::expr::expr;
use crate::parser::syntax::split_top_level_commas;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_print(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let (stmt, next) = self.parse_print_like(idx, "print")?;
        Ok((Statement::Print(stmt), next))
    }

    pub(crate) fn parse_put(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let (stmt, next) = self.parse_print_like(idx, "put")?;
        Ok((Statement::Put(stmt), next))
    }

    fn parse_print_like(&self, idx: usize, keyword: &str) -> CompileResult<(PrintStmt, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix(keyword).unwrap_or("").trim();
        let parts = split_top_level_commas(rest)
            .iter()
            .map(|p| expr(p, &self.file, line.number))
            .collect();
        Ok((PrintStmt::new(parts, self.pos(line.number)), idx + 1))
    }
}
