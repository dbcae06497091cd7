//! Small text-splitting helpers shared across statement parsers.
//!
//! These operate on already-cleaned, single-line text. They are careful to
//! ignore parens/brackets/commas that occur inside double-quoted strings,
//! since expressions are opaque text (§3.3) and may themselves contain
//! string literals with arbitrary punctuation.

/// Split `s` on top-level commas: commas nested inside `()`, `[]`, or a
/// string literal are not split points.
pub fn split_top_level_commas(s: &str) -> Vec<String> {
    let mut parts = vec![];
    let mut depth = 0i32;
    let mut in_string = false;
    let mut current = String::new();

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_string = !in_string;
                current.push(c);
            }
            '(' | '[' if !in_string => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' if !in_string => {
                depth -= 1;
                current.push(c);
            }
            ',' if !in_string && depth == 0 => {
                parts.push(current.trim().to_owned());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() || !parts.is_empty() {
        parts.push(current.trim().to_owned());
    }
    parts
}

/// Find the byte index of the `)` matching the `(` at byte index `open_idx`,
/// honoring string literals and nested parens. `open_idx` and the returned
/// index are both byte offsets into `s` (as `str::find` returns), not char
/// offsets, so callers can slice `s` directly with them even when `s`
/// contains multi-byte characters (a string-literal argument's contents
/// are not restricted to ASCII the way identifiers are, §6.2).
pub fn find_matching_paren(s: &str, open_idx: usize) -> Option<usize> {
    if s.as_bytes().get(open_idx) != Some(&b'(') {
        return None;
    }
    let mut depth = 0i32;
    let mut in_string = false;
    for (i, c) in s.char_indices() {
        if i < open_idx {
            continue;
        }
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// If `s` (trimmed) has the shape `head(args)` with nothing following the
/// closing paren, return `(head, args)`.
pub fn split_call(s: &str) -> Option<(String, String)> {
    let s = s.trim();
    let open = s.find('(')?;
    let close = find_matching_paren(s, open)?;
    if close + 1 != s.len() {
        return None;
    }
    let head = s[..open].trim().to_owned();
    let args = s[open + 1..close].trim().to_owned();
    Some((head, args))
}

pub fn parse_args(args: &str) -> Vec<String> {
    if args.trim().is_empty() {
        vec![]
    } else {
        split_top_level_commas(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_args() {
        assert_eq!(split_top_level_commas("a, b, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn keeps_nested_parens_together() {
        assert_eq!(
            split_top_level_commas("f(a, b), c"),
            vec!["f(a, b)", "c"]
        );
    }

    #[test]
    fn ignores_commas_inside_strings() {
        assert_eq!(
            split_top_level_commas("\"a, b\", c"),
            vec!["\"a, b\"", "c"]
        );
    }

    #[test]
    fn splits_call_head_and_args() {
        assert_eq!(
            split_call("foo(1, 2)"),
            Some(("foo".to_owned(), "1, 2".to_owned()))
        );
    }

    #[test]
    fn rejects_trailing_garbage_after_call() {
        assert_eq!(split_call("foo(1) + 2"), None);
    }

    #[test]
    fn splits_call_with_multibyte_string_argument() {
        assert_eq!(
            split_call("print(\"café\")"),
            Some(("print".to_owned(), "\"café\"".to_owned()))
        );
        assert_eq!(
            split_call("greet(\"日本\")"),
            Some(("greet".to_owned(), "\"日本\"".to_owned()))
        );
    }
}
