//! Source cleaner (§4.1).
//!
//! `clean` strips comments and rewrites `::` to `_`, all in a single
//! character-by-character pass that tracks whether we're inside a string
//! literal or a `$raw (...)` block. Line count is preserved so that error
//! line numbers reported by later stages stay meaningful.

use log::trace;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    InString,
    InRaw { depth: u32 },
}

/// Remove comments (outside strings and `$raw(...)` blocks) and rewrite `::`
/// to `_` (outside strings). The number of `\n` characters in the output
/// always equals the number in the input.
pub fn clean(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut mode = Mode::Normal;
    let mut i = 0;
    let mut line_start = 0usize;

    while i < chars.len() {
        let c = chars[i];

        match mode {
            Mode::InString => {
                out.push(c);
                if c == '"' && !is_escaped(&chars, i) {
                    mode = Mode::Normal;
                }
                if c == '\n' {
                    line_start = out.len();
                }
                i += 1;
            }
            Mode::InRaw { depth } => {
                out.push(c);
                match c {
                    '(' => mode = Mode::InRaw { depth: depth + 1 },
                    ')' => {
                        if depth <= 1 {
                            mode = Mode::Normal;
                        } else {
                            mode = Mode::InRaw { depth: depth - 1 };
                        }
                    }
                    '\n' => line_start = out.len(),
                    _ => {}
                }
                i += 1;
            }
            Mode::Normal => {
                if c == '"' {
                    out.push(c);
                    mode = Mode::InString;
                    i += 1;
                    continue;
                }

                if starts_raw_block(&chars, i) {
                    // Copy `$raw (` verbatim and enter raw mode counting the
                    // opening paren.
                    let raw_head = "$raw (";
                    out.push_str(raw_head);
                    i += raw_head.chars().count();
                    mode = Mode::InRaw { depth: 1 };
                    continue;
                }

                if c == '#' {
                    let is_full_line = out[line_start..].chars().all(|ch| ch.is_whitespace());
                    trace!("comment at byte {i} (full line: {is_full_line})");

                    // Elide up to (but not including) the newline.
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }

                    if is_full_line {
                        // Replace the whole line with a single newline: drop
                        // whatever whitespace we already pushed for this line.
                        out.truncate(line_start);
                    }
                    continue;
                }

                if c == ':' && chars.get(i + 1) == Some(&':') {
                    out.push('_');
                    i += 2;
                    continue;
                }

                out.push(c);
                if c == '\n' {
                    line_start = out.len();
                }
                i += 1;
            }
        }
    }

    out
}

fn is_escaped(chars: &[char], quote_index: usize) -> bool {
    quote_index > 0 && chars[quote_index - 1] == '\\'
}

fn starts_raw_block(chars: &[char], i: usize) -> bool {
    const HEAD: &str = "$raw (";
    let head_len = HEAD.chars().count();
    if i + head_len > chars.len() {
        return false;
    }
    chars[i..i + head_len].iter().collect::<String>() == HEAD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_full_line_comments() {
        let input = "x\n  # a comment\ny\n";
        let cleaned = clean(input);
        assert_eq!(cleaned, "x\n\ny\n");
    }

    #[test]
    fn strips_inline_comments_preserving_newline() {
        let input = "var int x = 1 # trailing\n";
        let cleaned = clean(input);
        assert_eq!(cleaned, "var int x = 1 \n");
    }

    #[test]
    fn does_not_strip_hash_inside_strings() {
        let input = "print \"not a # comment\"\n";
        assert_eq!(clean(input), input);
    }

    #[test]
    fn preserves_raw_block_comments() {
        let input = "$raw (int x = 1; // keep # this)\nafter\n";
        let cleaned = clean(input);
        assert_eq!(cleaned, input);
    }

    #[test]
    fn rewrites_double_colon_outside_strings() {
        let input = "module::symbol\n";
        assert_eq!(clean(input), "module_symbol\n");
    }

    #[test]
    fn does_not_rewrite_double_colon_inside_strings() {
        let input = "print \"a::b\"\n";
        assert_eq!(clean(input), input);
    }

    #[test]
    fn preserves_line_count() {
        let input = "a\n# comment\nb # inline\n\n\"str\nwith\nnewlines\"\nc\n";
        let newlines_in = input.matches('\n').count();
        let newlines_out = clean(input).matches('\n').count();
        assert_eq!(newlines_in, newlines_out);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let input = "var int x = 1 # c\nmodule::sym\n# full\ny\n";
        let once = clean(input);
        let twice = clean(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let input = "print \"a \\\" # not a comment\"\n";
        assert_eq!(clean(input), input);
    }
}
