//! The indentation-driven parser (§4.2).
//!
//! Single pass, recursive descent over a line array. Every block parser is
//! handed `(start_index, expected_indent)` and returns the statements it
//! consumed plus the index of the first line it did not consume, mirroring
//! the cursor-threading style the spec describes rather than a token stream
//! with backtracking.

mod expr;
pub mod line;
pub mod syntax;

mod statements {
    pub mod class_decl;
    pub mod function_decl;
    pub mod if_stmt;
    pub mod import_stmt;
    pub mod loops;
    pub mod method_call;
    pub mod print_put;
    pub mod raw_code;
    pub mod return_throw;
    pub mod simple;
    pub mod try_catch;
    pub mod var_decl;
}

use log::trace;

use crate::ast::{Position, Program, Statement};
use crate::error::{CompileError, CompileResult};

pub use self::line::Line;

pub struct Parser<'a> {
    pub(crate) lines: &'a [Line],
    pub(crate) file: String,
}

/// Parse a full (already-cleaned) source file into a `Program`.
pub fn parse_program(source: &str, file: &str) -> CompileResult<Program> {
    let lines = line::split_lines(source, file);
    let parser = Parser { lines: &lines, file: file.to_owned() };

    let (statements, next) = parser.parse_block(0, 0)?;
    if next < parser.lines.len() {
        // parse_block only stops early on a dedent, which can't happen at
        // top-level indent 0; this is defensive.
        trace!("parser stopped at line {next} of {}", parser.lines.len());
    }

    let mut imports = vec![];
    let mut body = vec![];
    for statement in statements {
        match statement {
            Statement::Import(import) => imports.push(import),
            other => body.push(other),
        }
    }

    Ok(Program::new(imports, body))
}

impl<'a> Parser<'a> {
    pub(crate) fn pos(&self, line: usize) -> Position {
        Position::new(self.file.clone(), line)
    }

    /// Skip blank lines starting at `idx`, returning the index of the next
    /// non-blank line (or `lines.len()` if there is none).
    pub(crate) fn skip_blank(&self, mut idx: usize) -> usize {
        while idx < self.lines.len() && self.lines[idx].is_blank_or_comment() {
            idx += 1;
        }
        idx
    }

    /// The indent a nested block should use: the indent of the first
    /// non-blank line after `after_idx`, or `None` if the block is empty.
    pub(crate) fn discover_body_indent(&self, after_idx: usize) -> Option<usize> {
        let idx = self.skip_blank(after_idx);
        self.lines.get(idx).map(Line::indent)
    }

    /// Parse a sequence of statements at exactly `expected_indent`, stopping
    /// at the first line whose indent is smaller (the block's end) and
    /// failing if a line's indent is larger.
    pub(crate) fn parse_block(
        &self,
        start: usize,
        expected_indent: usize,
    ) -> CompileResult<(Vec<Statement>, usize)> {
        let mut statements = vec![];
        let mut idx = start;

        loop {
            idx = self.skip_blank(idx);
            if idx >= self.lines.len() {
                break;
            }

            let line = &self.lines[idx];
            let indent = line.indent();

            if indent < expected_indent {
                break;
            }
            if indent > expected_indent {
                return Err(CompileError::Indentation {
                    line: line.number,
                    expected: expected_indent,
                    got: indent,
                });
            }

            // `elif`/`else` are only valid immediately following an `if`
            // block, which consumes them itself; seeing one here means it
            // was not preceded by an `if` at this indent.
            if matches!(line.first_token(), Some("elif") | Some("else")) {
                return Err(CompileError::Syntax {
                    line: line.number,
                    message: "'elif'/'else' without a preceding 'if'".to_owned(),
                });
            }

            let (new_statements, next_idx) = self.dispatch(idx, expected_indent)?;
            statements.extend(new_statements);
            idx = next_idx;
        }

        Ok((statements, idx))
    }

    /// Dispatch a single statement by its first token, returning every
    /// `Statement` it produced (almost always one, except bulk imports) and
    /// the index of the next unconsumed line.
    fn dispatch(
        &self,
        idx: usize,
        indent: usize,
    ) -> CompileResult<(Vec<Statement>, usize)> {
        let line = &self.lines[idx];
        let token = line.first_token().unwrap_or("");

        match token {
            "import" => self.parse_import(idx, indent),
            "pub" => self.parse_pub(idx, indent),
            "print" => self.parse_print(idx).map(|(s, n)| (vec![s], n)),
            "put" => self.parse_put(idx).map(|(s, n)| (vec![s], n)),
            "sleep" => self.parse_sleep(idx).map(|(s, n)| (vec![s], n)),
            "break" => Ok((vec![Statement::Break(self.pos(line.number))], idx + 1)),
            "continue" => Ok((vec![Statement::Continue(self.pos(line.number))], idx + 1)),
            "while" => self.parse_while(idx, indent).map(|(s, n)| (vec![s], n)),
            "for" => self.parse_for(idx, indent, false).map(|(s, n)| (vec![s], n)),
            "parallel" => self.parse_parallel_for(idx, indent).map(|(s, n)| (vec![s], n)),
            "if" => self.parse_if(idx, indent).map(|(s, n)| (vec![s], n)),
            "var" => self.parse_var(idx, indent).map(|(s, n)| (vec![s], n)),
            "reassign" => self.parse_reassign(idx).map(|(s, n)| (vec![s], n)),
            "class" => self.parse_class(idx, indent).map(|(s, n)| (vec![s], n)),
            "fn" => self.parse_function(idx, indent).map(|(s, n)| (vec![s], n)),
            "return" => self.parse_return(idx).map(|(s, n)| (vec![s], n)),
            "throw" => self.parse_throw(idx).map(|(s, n)| (vec![s], n)),
            "try" => self.parse_try_catch(idx, indent).map(|(s, n)| (vec![s], n)),
            "$raw" => self.parse_raw_code(idx).map(|(s, n)| (vec![s], n)),
            _ => self.parse_fallback(idx, indent).map(|(s, n)| (vec![s], n)),
        }
    }

    /// The fallback classifications of §4.2 for lines that match no
    /// dispatch keyword.
    fn parse_fallback(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let text = line.trimmed();

        if let Some(stmt) = self.try_method_call_statement(text, line.number)? {
            return Ok((stmt, idx + 1));
        }
        if let Some(stmt) = self.try_bare_function_call(text, line.number)? {
            return Ok((stmt, idx + 1));
        }
        if let Some(stmt) = self.try_declaration_like(text, line.number, false)? {
            return Ok((stmt, idx + 1));
        }

        let _ = indent;
        Err(CompileError::UnknownStatement { line: line.number, text: text.to_owned() })
    }

    fn parse_pub(&self, idx: usize, indent: usize) -> CompileResult<(Statement, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("pub").unwrap_or("").trim_start();
        if rest.is_empty() {
            return Err(CompileError::Syntax {
                line: line.number,
                message: "'pub' with nothing following".to_owned(),
            });
        }

        let token = rest.split_whitespace().next().unwrap_or("");
        match token {
            "var" => {
                let rest = rest.strip_prefix("var").unwrap_or("").trim();
                self.parse_var_text(rest, idx, indent, true)
            }
            "class" => {
                let rest = rest.strip_prefix("class").unwrap_or("").trim();
                self.parse_class_text(rest, idx, indent, true)
            }
            "fn" => {
                let rest = rest.strip_prefix("fn").unwrap_or("").trim();
                self.parse_function_text(rest, idx, indent, true)
            }
            _ => self
                .try_declaration_like(rest, line.number, true)
                .transpose()
                .unwrap_or_else(|| {
                    Err(CompileError::Syntax {
                        line: line.number,
                        message: format!("'pub' cannot apply to '{token}'"),
                    })
                })
                .map(|stmt| (stmt, idx + 1)),
        }
    }
}
