//! Small shared helpers for building the emitted C text.

use std::fmt::Write as _;

pub const INDENT_UNIT: &str = "    ";

pub fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT_UNIT);
    }
}

pub fn push_line(out: &mut String, level: usize, text: &str) {
    push_indent(out, level);
    out.push_str(text);
    out.push('\n');
}

pub fn push_linef(out: &mut String, level: usize, args: std::fmt::Arguments<'_>) {
    push_indent(out, level);
    let _ = out.write_fmt(args);
    out.push('\n');
}

#[macro_export]
macro_rules! emit_line {
    ($out:expr, $level:expr, $($arg:tt)*) => {
        $crate::emitter::util::push_linef($out, $level, format_args!($($arg)*))
    };
}
