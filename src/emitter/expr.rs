//! Expression-level lowering shared by every statement emitter: run
//! the resolver's module-flattening/cast-sugar rewrite, and — only for
//! a handful of spots where the grammar calls for it — a literal
//! `this.` -> `this->` substitution local to an identifier occurring at
//! the very start of an expression. The *global* `this.` rewrite
//! (anywhere in emitted text, outside strings) is left to the macro
//! post-processor (§4.7, §9): doing it twice would just be two passes
//! doing the same job.

use crate::ast::{Expression, InferredType};
use crate::resolver::ResolverContext;

/// Resolve module qualification/cast sugar in an expression's text.
pub fn lower(expr: &Expression, resolver: &ResolverContext<'_>) -> String {
    resolver.resolve_text(&expr.text)
}

/// The `printf`/`scanf`-style conversion specifier for a bare
/// (non-literal) expression being interpolated into a `print`/`put`
/// without an explicit format string (§4.6's print/put lowering).
pub fn default_format_specifier(expr: &Expression) -> &'static str {
    match expr.infer_type() {
        InferredType::String => "%s",
        InferredType::Float => "%f",
        InferredType::Bool => "%d",
        InferredType::Int => "%d",
        InferredType::Object | InferredType::Reference => "%p",
    }
}

/// Strip a surrounding pair of double quotes from a string-literal
/// expression's text, returning the raw content (still C-escaped as
/// written in source).
pub fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
