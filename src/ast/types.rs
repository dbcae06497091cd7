//! Declared types in Scar source.
//!
//! Expressions stay opaque text (§3.3), but declared types are structured
//! enough that the emitter needs to decide struct layout, so they get a real
//! sum type rather than being carried as strings.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A scalar or class name as written in source: `int`, `string`, `i32`,
    /// `MyClass`, ...
    Named(String),
    List(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Ref(Box<Type>),
    Void,
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::Named(name) if name == "string")
    }

    /// The cast-sugar primitive names from §4.5: these get `T(x)` rewritten
    /// to `(T)(x)` by the resolver.
    pub fn is_cast_primitive(name: &str) -> bool {
        matches!(name, "float" | "int" | "double" | "char")
    }

    /// True for the scalar-width type names that trigger the macro
    /// post-processor's stdint typedef block (§4.7).
    pub fn is_stdint_width(name: &str) -> bool {
        matches!(
            name,
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "f32" | "f64"
        )
    }

    /// Parse a type annotation as it appears in a declaration, e.g. `int`,
    /// `ref Cat`, `list[int]`, `map[string:int]`.
    pub fn parse(text: &str) -> Option<Type> {
        let text = text.trim();
        if let Some(rest) = text.strip_prefix("ref ") {
            return Some(Type::Ref(Box::new(Type::parse(rest)?)));
        }
        if let Some(rest) = text.strip_prefix("list[").and_then(|s| s.strip_suffix(']')) {
            return Some(Type::List(Box::new(Type::parse(rest)?)));
        }
        if let Some(rest) = text.strip_prefix("map[").and_then(|s| s.strip_suffix(']')) {
            let (key, value) = rest.split_once(':')?;
            return Some(Type::Map(
                Box::new(Type::parse(key)?),
                Box::new(Type::parse(value)?),
            ));
        }
        if text.is_empty() {
            return None;
        }
        Some(Type::Named(text.to_owned()))
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{name}"),
            Type::List(elem) => write!(f, "list[{elem}]"),
            Type::Map(key, value) => write!(f, "map[{key}:{value}]"),
            Type::Ref(inner) => write!(f, "ref {inner}"),
            Type::Void => write!(f, "void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_names() {
        assert_eq!(Type::parse("int"), Some(Type::Named("int".into())));
    }

    #[test]
    fn parses_ref_types() {
        assert_eq!(
            Type::parse("ref Cat"),
            Some(Type::Ref(Box::new(Type::Named("Cat".into()))))
        );
    }

    #[test]
    fn parses_list_and_map() {
        assert_eq!(
            Type::parse("list[int]"),
            Some(Type::List(Box::new(Type::Named("int".into()))))
        );
        assert_eq!(
            Type::parse("map[string:int]"),
            Some(Type::Map(
                Box::new(Type::Named("string".into())),
                Box::new(Type::Named("int".into()))
            ))
        );
    }
}
