//! Macro post-processor (§4.7): the last pipeline stage, run once over
//! the fully assembled C text.
//!
//! Per design note 9, the `this.` -> `this->` and `and`/`or` operator
//! rewrites share one stateful character-by-character pass with the
//! `rand`/`cat!`/`fmt!` call-sugar rewrites, rather than each being an
//! independent regex pass over the same text. A second scan then
//! decides which `#define`/typedef blocks that rewritten text actually
//! needs, so untouched programs don't carry dead helpers.

use std::collections::BTreeSet;

const ANCHOR: &str = "int _exception = 0;\n";

const RAND_HELPER: &str = "#include <time.h>\nstatic int _rand_seeded = 0;\nstatic int rand__internal(int lo, int hi) {\n    if (!_rand_seeded) { srand((unsigned int)time(NULL)); _rand_seeded = 1; }\n    return lo + (rand() % (hi - lo + 1));\n}";

const CAT_HELPER: &str = "static char _cat_buffer[256];\nstatic char* cat(const char* a, const char* b) {\n    snprintf(_cat_buffer, sizeof(_cat_buffer), \"%s%s\", a, b);\n    return _cat_buffer;\n}";

const FMT_HELPER: &str = "#include <stdarg.h>\nstatic char* fmt(const char* format, ...) {\n    va_list args;\n    va_start(args, format);\n    int needed = vsnprintf(NULL, 0, format, args);\n    va_end(args);\n    char* buffer = (char*)malloc((size_t)needed + 1);\n    va_start(args, format);\n    vsnprintf(buffer, (size_t)needed + 1, format, args);\n    va_end(args);\n    return buffer;\n}";

/// Run the full post-processing pass over one emitted translation unit.
pub fn postprocess(source: &str) -> String {
    let rewritten = rewrite(source);
    let defines = collect_defines(&rewritten);

    if defines.is_empty() {
        return rewritten;
    }

    match rewritten.find(ANCHOR) {
        Some(idx) => {
            let split_at = idx + ANCHOR.len();
            let mut out = String::with_capacity(rewritten.len() + defines.len());
            out.push_str(&rewritten[..split_at]);
            out.push('\n');
            out.push_str(&defines);
            out.push_str(&rewritten[split_at..]);
            out
        }
        None => format!("{defines}\n{rewritten}"),
    }
}

/// `this.` -> `this->`, ` and ` -> ` && `, ` or ` -> ` || `, `rand(` ->
/// `rand__internal(`, `cat!(` -> `cat(`, `fmt!(` -> `fmt(`. None of it
/// touches double-quoted string contents.
fn rewrite(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' && !is_escaped(&chars, i) {
            in_string = !in_string;
            out.push(c);
            i += 1;
            continue;
        }
        if in_string {
            out.push(c);
            i += 1;
            continue;
        }

        if matches_literal(&chars, i, "this.") && !preceded_by_ident(&chars, i) {
            out.push_str("this->");
            i += 5;
            continue;
        }
        if matches_literal(&chars, i, " and ") {
            out.push_str(" && ");
            i += 5;
            continue;
        }
        if matches_literal(&chars, i, " or ") {
            out.push_str(" || ");
            i += 4;
            continue;
        }
        if matches_literal(&chars, i, "cat!(") {
            out.push_str("cat(");
            i += 5;
            continue;
        }
        if matches_literal(&chars, i, "fmt!(") {
            out.push_str("fmt(");
            i += 5;
            continue;
        }
        if matches_literal(&chars, i, "rand") && !preceded_by_ident(&chars, i) && chars.get(i + 4) == Some(&'(') {
            out.push_str("rand__internal");
            i += 4;
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

fn collect_defines(text: &str) -> String {
    let mut blocks = vec![];

    if contains_word(text, "nil") {
        blocks.push("#define nil NULL".to_owned());
    }
    if contains_call(text, "len") {
        blocks.push("#define len(x) (sizeof(x)/sizeof((x)[0]))".to_owned());
    }
    if contains_call(text, "ord") {
        blocks.push("#define ord(x) ((int)(x))".to_owned());
    }
    if contains_call(text, "rand__internal") {
        blocks.push(RAND_HELPER.to_owned());
    }
    if contains_call(text, "cat") {
        blocks.push(CAT_HELPER.to_owned());
    }
    if contains_call(text, "fmt") {
        blocks.push(FMT_HELPER.to_owned());
    }

    let stdint_names = ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64"];
    let used: BTreeSet<&str> = stdint_names.iter().copied().filter(|n| contains_word(text, n)).collect();
    if !used.is_empty() {
        blocks.push(stdint_typedefs(&used));
    }

    if blocks.is_empty() {
        String::new()
    } else {
        blocks.join("\n") + "\n"
    }
}

fn stdint_typedefs(used: &BTreeSet<&str>) -> String {
    let mut s = String::from("#include <stdint.h>\n");
    for name in used {
        let real = match *name {
            "i8" => "int8_t",
            "i16" => "int16_t",
            "i32" => "int32_t",
            "i64" => "int64_t",
            "u8" => "uint8_t",
            "u16" => "uint16_t",
            "u32" => "uint32_t",
            "u64" => "uint64_t",
            "f32" => "float",
            "f64" => "double",
            _ => unreachable!("filtered to the stdint-width name set above"),
        };
        s.push_str(&format!("typedef {real} {name};\n"));
    }
    s
}

fn contains_word(text: &str, word: &str) -> bool {
    scan_occurrences(text, word, false)
}

fn contains_call(text: &str, word: &str) -> bool {
    scan_occurrences(text, word, true)
}

fn scan_occurrences(text: &str, word: &str, require_call: bool) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let word_chars: Vec<char> = word.chars().collect();
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' && !is_escaped(&chars, i) {
            in_string = !in_string;
            i += 1;
            continue;
        }
        if !in_string && matches_literal(&chars, i, word) {
            let before_ok = !(i > 0 && is_ident_char(chars[i - 1]));
            let after_idx = i + word_chars.len();
            let after_char = chars.get(after_idx).copied();
            let after_ok = if require_call {
                after_char == Some('(')
            } else {
                !after_char.map(is_ident_char).unwrap_or(false)
            };
            if before_ok && after_ok {
                return true;
            }
        }
        i += 1;
    }
    false
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_escaped(chars: &[char], idx: usize) -> bool {
    let mut backslashes = 0;
    let mut j = idx;
    while j > 0 && chars[j - 1] == '\\' {
        backslashes += 1;
        j -= 1;
    }
    backslashes % 2 == 1
}

fn matches_literal(chars: &[char], i: usize, needle: &str) -> bool {
    let needle_chars: Vec<char> = needle.chars().collect();
    if i + needle_chars.len() > chars.len() {
        return false;
    }
    chars[i..i + needle_chars.len()] == needle_chars[..]
}

fn preceded_by_ident(chars: &[char], i: usize) -> bool {
    i > 0 && is_ident_char(chars[i - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_this_dot_outside_strings() {
        let out = postprocess("int f(void) {\n    this.x = 1;\n}\n");
        assert!(out.contains("this->x = 1;"));
    }

    #[test]
    fn leaves_this_dot_inside_strings_alone() {
        let out = postprocess("int f(void) {\n    printf(\"this.x\");\n}\n");
        assert!(out.contains("\"this.x\""));
    }

    #[test]
    fn rewrites_and_or() {
        let out = postprocess("if (a and b or c) {}\n");
        assert!(out.contains("if (a && b || c) {}"));
    }

    #[test]
    fn inserts_nil_define_only_when_referenced() {
        let with_nil = postprocess(&format!("{ANCHOR}\nint* p = nil;\n"));
        assert!(with_nil.contains("#define nil NULL"));

        let without_nil = postprocess(&format!("{ANCHOR}\nint x = 1;\n"));
        assert!(!without_nil.contains("#define nil"));
    }

    #[test]
    fn rewrites_rand_call_and_inserts_helper() {
        let out = postprocess(&format!("{ANCHOR}\nint r = rand(1, 6);\n"));
        assert!(out.contains("rand__internal(1, 6)"));
        assert!(out.contains("static int rand__internal"));
    }

    #[test]
    fn rewrites_cat_bang_and_inserts_helper() {
        let out = postprocess(&format!("{ANCHOR}\nchar* s = cat!(a, b);\n"));
        assert!(out.contains("cat(a, b)"));
        assert!(out.contains("static char* cat("));
    }

    #[test]
    fn inserts_only_the_referenced_stdint_typedefs() {
        let out = postprocess(&format!("{ANCHOR}\ni32 x;\n"));
        assert!(out.contains("typedef int32_t i32;"));
        assert!(!out.contains("typedef uint8_t u8;"));
    }
}
