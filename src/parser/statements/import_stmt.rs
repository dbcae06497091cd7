//! `import` (§4.2): bulk form `import "a", "b"` on one line, or a bare
//! `import` followed by an indented list of quoted module names running
//! until the first zero-indent non-blank line.

use crate::ast::{Import, Statement};
use crate::error::{CompileError, CompileResult};
use crate::parser::syntax::split_top_level_commas;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_import(&self, idx: usize, _indent: usize) -> CompileResult<(Vec<Statement>, usize)> {
        let line = &self.lines[idx];
        let rest = line.trimmed().strip_prefix("import").unwrap_or("").trim();

        let mut names = vec![];
        let mut next = idx + 1;

        if !rest.is_empty() {
            for part in split_top_level_commas(rest) {
                names.push((unquote(&part, line.number)?, line.number));
            }
        } else {
            loop {
                let peek = self.skip_blank(next);
                let Some(peek_line) = self.lines.get(peek) else { break };
                if peek_line.indent() == 0 {
                    break;
                }
                let text = peek_line.trimmed();
                let Ok(name) = unquote(text.trim_end_matches(','), peek_line.number) else { break };
                names.push((name, peek_line.number));
                next = peek + 1;
            }
        }

        if names.is_empty() {
            return Err(CompileError::Syntax {
                line: line.number,
                message: "'import' names no module".to_owned(),
            });
        }

        let statements = names
            .into_iter()
            .map(|(name, line_no)| Statement::Import(Import::new(name, self.pos(line_no))))
            .collect();
        Ok((statements, next))
    }
}

fn unquote(text: &str, line_no: usize) -> CompileResult<String> {
    let text = text.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Ok(text[1..text.len() - 1].to_owned())
    } else {
        Err(CompileError::Syntax { line: line_no, message: format!("expected a quoted module name, got '{text}'") })
    }
}
