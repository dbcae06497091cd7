//! Text-splitting helpers specific to building `Expression`/declaration
//! shapes out of a single line of opaque text (§3.3, §4.2).

use crate::ast::{Expression, Position};
use crate::error::{CompileError, CompileResult};

/// Strip the trailing `:` a block header must end with.
pub fn require_colon<'s>(s: &'s str, line_no: usize) -> CompileResult<&'s str> {
    let s = s.trim_end();
    s.strip_suffix(':').map(str::trim_end).ok_or_else(|| CompileError::Syntax {
        line: line_no,
        message: "expected ':' at end of block header".to_owned(),
    })
}

/// Split on the first top-level `=` that isn't part of `==`, `!=`, `<=`,
/// `>=`, skipping string literals and bracketed groups.
pub fn split_top_level_eq(s: &str) -> Option<(&str, &str)> {
    let chars: Vec<char> = s.chars().collect();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut byte = 0usize;
    let mut char_idx = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '"' => in_string = !in_string,
            '(' | '[' if !in_string => depth += 1,
            ')' | ']' if !in_string => depth -= 1,
            '=' if !in_string && depth == 0 => {
                let prev = if i > 0 { chars[i - 1] } else { ' ' };
                let next = chars.get(i + 1).copied().unwrap_or(' ');
                if prev != '=' && prev != '!' && prev != '<' && prev != '>' && next != '=' {
                    char_idx = i;
                    byte = s.char_indices().nth(i).map(|(b, _)| b).unwrap_or(s.len());
                    return Some((&s[..byte], &s[byte + 1..]));
                }
            }
            _ => {}
        }
    }
    let _ = char_idx;
    None
}

/// Split on the first top-level `.` — used for `obj.method(args)` shapes.
/// A leading `this.` is treated as part of the object, not a split point
/// inside a chain; callers only need one split so this returns the first.
pub fn split_top_level_dot(s: &str) -> Option<(&str, &str)> {
    let chars: Vec<char> = s.chars().collect();
    let mut depth = 0i32;
    let mut in_string = false;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '"' => in_string = !in_string,
            '(' | '[' if !in_string => depth += 1,
            ')' | ']' if !in_string => depth -= 1,
            '.' if !in_string && depth == 0 => {
                let byte = s.char_indices().nth(i).map(|(b, _)| b).unwrap_or(s.len());
                return Some((&s[..byte], &s[byte + 1..]));
            }
            _ => {}
        }
    }
    None
}

/// Split a `key:value` map-literal entry on its first top-level `:`,
/// skipping string literals and bracketed groups (so a string value may
/// itself contain a colon).
pub fn split_top_level_colon(s: &str) -> Option<(&str, &str)> {
    let chars: Vec<char> = s.chars().collect();
    let mut depth = 0i32;
    let mut in_string = false;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '"' => in_string = !in_string,
            '(' | '[' if !in_string => depth += 1,
            ')' | ']' if !in_string => depth -= 1,
            ':' if !in_string && depth == 0 => {
                let byte = s.char_indices().nth(i).map(|(b, _)| b).unwrap_or(s.len());
                return Some((&s[..byte], &s[byte + 1..]));
            }
            _ => {}
        }
    }
    None
}

pub fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

pub fn expr(text: &str, file: &str, line: usize) -> Expression {
    Expression::new(text.trim().to_owned(), Position::new(file.to_owned(), line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_plain_equals() {
        assert_eq!(split_top_level_eq("x = 1"), Some(("x ", " 1")));
    }

    #[test]
    fn does_not_split_on_equality() {
        assert_eq!(split_top_level_eq("x == 1"), None);
    }

    #[test]
    fn does_not_split_equals_inside_string() {
        assert_eq!(split_top_level_eq("x = \"a=b\""), Some(("x ", " \"a=b\"")));
    }

    #[test]
    fn splits_object_dot_method() {
        assert_eq!(split_top_level_dot("fluffy.meow()"), Some(("fluffy", "meow()")));
    }

    #[test]
    fn recognizes_identifiers() {
        assert!(is_ident("_x9"));
        assert!(!is_ident("9x"));
        assert!(!is_ident("a.b"));
    }
}
