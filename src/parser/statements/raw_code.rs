//! `$raw (...)` (§4.1, §3.2): literal C, passed through verbatim. The block
//! may span multiple physical lines; it ends at the `)` that balances the
//! opening one, tracked the same way the cleaner tracks raw-block depth.

use crate::ast::Statement;
use crate::error::{CompileError, CompileResult};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_raw_code(&self, idx: usize) -> CompileResult<(Statement, usize)> {
        let start_line = &self.lines[idx];
        let header = start_line.trimmed();
        let Some(after_head) = header.strip_prefix("$raw (") else {
            return Err(CompileError::Syntax { line: start_line.number, message: "expected '$raw ('".to_owned() });
        };

        let mut text = String::new();
        let mut depth = 1i32;
        let mut consume = |s: &str, text: &mut String, depth: &mut i32| -> bool {
            for c in s.chars() {
                match c {
                    '(' => *depth += 1,
                    ')' => {
                        *depth -= 1;
                        if *depth == 0 {
                            return true;
                        }
                    }
                    _ => {}
                }
                text.push(c);
            }
            false
        };

        if consume(after_head, &mut text, &mut depth) {
            // Closed on the same line; drop the trailing `)` we just pushed.
            text.pop();
            return Ok((Statement::RawCode { text, position: self.pos(start_line.number) }, idx + 1));
        }
        text.push('\n');

        let mut idx = idx + 1;
        loop {
            let Some(line) = self.lines.get(idx) else {
                return Err(CompileError::Syntax {
                    line: start_line.number,
                    message: "unterminated '$raw (' block".to_owned(),
                });
            };
            if consume(&line.raw, &mut text, &mut depth) {
                text.pop();
                return Ok((Statement::RawCode { text, position: self.pos(start_line.number) }, idx + 1));
            }
            text.push('\n');
            idx += 1;
        }
    }
}
