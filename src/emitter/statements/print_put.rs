//! `print`/`put` lowering (§4.6): a lone string literal lowers directly
//! to `printf("...");`; a literal followed by further parts is treated
//! as a format string plus interpolated arguments; a lone non-literal
//! part gets a default conversion specifier inferred from its shape
//! (§4.5's literal-shape heuristic, reused here for lack of any other
//! type information since expressions are opaque text, §3.3).

use crate::ast::PrintStmt;
use crate::emit_line;
use crate::emitter::expr::{default_format_specifier, lower, unquote};
use crate::resolver::ResolverContext;

pub fn emit_print_put(out: &mut String, level: usize, stmt: &PrintStmt, newline: bool, resolver: &ResolverContext<'_>) {
    let suffix = if newline { "\\n" } else { "" };

    match stmt.parts.as_slice() {
        [] => emit_line!(out, level, "printf(\"{suffix}\");"),
        [only] if only.is_string_literal() => {
            emit_line!(out, level, "printf(\"{}{suffix}\");", unquote(&only.text));
        }
        [only] => {
            let spec = default_format_specifier(only);
            emit_line!(out, level, "printf(\"{spec}{suffix}\", {});", lower(only, resolver));
        }
        [head, rest @ ..] if head.is_string_literal() => {
            let args: Vec<String> = rest.iter().map(|e| lower(e, resolver)).collect();
            emit_line!(out, level, "printf(\"{}{suffix}\", {});", unquote(&head.text), args.join(", "));
        }
        parts => {
            // No leading format-string literal: fall back to one
            // conversion specifier per part, space-joined.
            let format: String = parts.iter().map(|p| default_format_specifier(p)).collect::<Vec<_>>().join(" ");
            let args: Vec<String> = parts.iter().map(|e| lower(e, resolver)).collect();
            emit_line!(out, level, "printf(\"{format}{suffix}\", {});", args.join(", "));
        }
    }
}
