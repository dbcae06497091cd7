//! `if`/`elif`/`else` (§4.2): the `if` parser continues past its own body to
//! consume any `elif` blocks and an optional `else` block at the same
//! indent as the `if` itself.

use crate::ast::{ElifBranch, IfStmt, Statement};
use crate::error::{CompileError, CompileResult};
use crate::parser::expr::{expr, require_colon};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_if(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let header = line.trimmed().strip_prefix("if").unwrap_or("").trim();
        let condition_text = require_colon(header, line.number)?;
        let condition = expr(condition_text, &self.file, line.number);
        let position = self.pos(line.number);

        let body_indent = self.discover_body_indent(idx + 1).unwrap_or(indent + 1);
        if body_indent <= indent {
            return Err(CompileError::Indentation { line: line.number, expected: indent + 1, got: body_indent });
        }
        let (body, mut next) = self.parse_block(idx + 1, body_indent)?;

        let mut elifs = vec![];
        let mut else_body = None;

        loop {
            let peek = self.skip_blank(next);
            let Some(peek_line) = self.lines.get(peek) else { break };
            if peek_line.indent() != indent {
                break;
            }
            match peek_line.first_token() {
                Some("elif") => {
                    let header = peek_line.trimmed().strip_prefix("elif").unwrap_or("").trim();
                    let cond_text = require_colon(header, peek_line.number)?;
                    let elif_pos = self.pos(peek_line.number);
                    let elif_condition = expr(cond_text, &self.file, peek_line.number);

                    let elif_body_indent = self.discover_body_indent(peek + 1).unwrap_or(indent + 1);
                    if elif_body_indent <= indent {
                        return Err(CompileError::Indentation {
                            line: peek_line.number,
                            expected: indent + 1,
                            got: elif_body_indent,
                        });
                    }
                    let (elif_body, elif_next) = self.parse_block(peek + 1, elif_body_indent)?;
                    elifs.push(ElifBranch { condition: elif_condition, body: elif_body, position: elif_pos });
                    next = elif_next;
                }
                Some("else") => {
                    let header = peek_line.trimmed().strip_prefix("else").unwrap_or("").trim();
                    require_colon(header, peek_line.number)?;

                    let else_body_indent = self.discover_body_indent(peek + 1).unwrap_or(indent + 1);
                    if else_body_indent <= indent {
                        return Err(CompileError::Indentation {
                            line: peek_line.number,
                            expected: indent + 1,
                            got: else_body_indent,
                        });
                    }
                    let (body, else_next) = self.parse_block(peek + 1, else_body_indent)?;
                    else_body = Some(body);
                    next = else_next;
                    break;
                }
                _ => break,
            }
        }

        Ok((Statement::If(IfStmt { condition, body, elifs, else_body, position }), next))
    }
}
