//! `try:`/`catch:` (§4.2, §4.6): a `try` block must be followed by a
//! `catch` block at the same indent, or it's a SyntaxError.

use crate::ast::{Statement, TryCatchStmt};
use crate::error::{CompileError, CompileResult};
use crate::parser::expr::require_colon;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_try_catch(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let header = line.trimmed().strip_prefix("try").unwrap_or("").trim();
        require_colon(header, line.number)?;
        let position = self.pos(line.number);

        let try_body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
        if try_body_indent <= indent {
            return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: try_body_indent });
        }
        let (try_body, next) = self.parse_block(idx + 1, try_body_indent)?;

        let catch_idx = self.skip_blank(next);
        let catch_line = self.lines.get(catch_idx).ok_or_else(|| CompileError::Syntax {
            line: line.number,
            message: "'try' without a matching 'catch'".to_owned(),
        })?;
        if catch_line.indent() != indent || catch_line.first_token() != Some("catch") {
            return Err(CompileError::Syntax {
                line: line.number,
                message: "'try' without a matching 'catch'".to_owned(),
            });
        }
        let catch_header = catch_line.trimmed().strip_prefix("catch").unwrap_or("").trim();
        require_colon(catch_header, catch_line.number)?;

        let catch_body_indent = self.discover_body_indent(catch_idx + 1).unwrap_or(indent + 1);
        if catch_body_indent <= indent {
            return Err(CompileError::Indentation {
                line: catch_line.number,
                expected: indent + 1,
                got: catch_body_indent,
            });
        }
        let (catch_body, next) = self.parse_block(catch_idx + 1, catch_body_indent)?;

        Ok((Statement::TryCatch(TryCatchStmt { try_body, catch_body, position }), next))
    }
}
