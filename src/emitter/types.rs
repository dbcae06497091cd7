//! Declared-type -> C type lowering (§4.6).

use crate::ast::Type;
use crate::session::CompileSession;

/// Strings are a fixed-size buffer; every other scalar maps to its C
/// equivalent by name (primitives and the stdint-width aliases pass
/// through unchanged — the macro post-processor supplies their
/// typedefs, §4.7).
pub const MAX_STRING_LENGTH: usize = 256;

/// The C type-and-declarator pair for a value of type `ty` named
/// `name`: most types are `"{c_type} {name}"`, but strings need the
/// array-bracket form `char {name}[256]` and reference/class/list
/// types need a trailing `*`.
pub fn declare(ty: &Type, name: &str, is_ref: bool, session: &CompileSession) -> String {
    match ty {
        Type::Named(n) if n == "string" => format!("char {name}[{MAX_STRING_LENGTH}]"),
        Type::Ref(inner) => format!("{} {name}", pointer_type(inner, session)),
        Type::Named(n) if session.classes.contains_key(n) => {
            format!("{n}* {name}")
        }
        Type::Named(n) => {
            let base = scalar_name(n);
            if is_ref {
                format!("{base}* {name}")
            } else {
                format!("{base} {name}")
            }
        }
        Type::List(elem) => format!("{}* {name}", scalar_c_type(elem, session)),
        Type::Map(_, _) => format!("void* {name} /* map fields are not supported inline */"),
        Type::Void => format!("void {name}"),
    }
}

/// The bare C type name for `ty` (no declarator), used for return
/// types, parameter types, and cast expressions.
pub fn scalar_c_type(ty: &Type, session: &CompileSession) -> String {
    match ty {
        Type::Named(n) if n == "string" => "char*".to_owned(),
        Type::Named(n) if session.classes.contains_key(n) => format!("{n}*"),
        Type::Named(n) => scalar_name(n).to_owned(),
        Type::Ref(inner) => pointer_type(inner, session),
        Type::List(elem) => format!("{}*", scalar_c_type(elem, session)),
        Type::Map(_, _) => "void*".to_owned(),
        Type::Void => "void".to_owned(),
    }
}

fn pointer_type(inner: &Type, session: &CompileSession) -> String {
    match inner {
        Type::Named(n) if session.classes.contains_key(n) => format!("{n}*"),
        other => format!("{}*", scalar_c_type(other, session)),
    }
}

/// Map a primitive/scalar name through to its C spelling. Class and
/// stdint-width names pass through unchanged (the latter are given
/// typedefs by the macro post-processor, §4.7).
fn scalar_name(name: &str) -> &str {
    match name {
        "string" => "char*",
        "object" => "void*",
        "reference" => "void*",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_become_fixed_buffers() {
        let session = CompileSession::new();
        assert_eq!(declare(&Type::named("string"), "name", false, &session), "char name[256]");
    }

    #[test]
    fn primitives_pass_through() {
        let session = CompileSession::new();
        assert_eq!(declare(&Type::named("int"), "x", false, &session), "int x");
    }

    #[test]
    fn ref_primitive_becomes_pointer() {
        let session = CompileSession::new();
        assert_eq!(declare(&Type::Ref(Box::new(Type::named("int"))), "x", true, &session), "int* x");
    }
}
