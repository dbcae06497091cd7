//! The single mutable value the whole pipeline threads through (§5, §9
//! "Process-wide tables"). `LoadedModules`, `globalClasses`, and friends
//! from the source design become fields here instead of module-level
//! statics, with a lifetime equal to one compiler invocation.

use std::collections::HashMap;

use crate::ast::{ClassDecl, FunctionDecl, Type};
use crate::loader::ModuleInfo;

/// A class's collected fields and methods, keyed by class name. Populated
/// by a pre-walk of the local program plus every loaded module; read-only
/// during emission.
#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub decl: ClassDecl,
    /// (field name, field type, is_ref), in first-occurrence order (§4.6).
    pub fields: Vec<(String, Type, bool)>,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionInfo {
    pub decl: FunctionDecl,
}

/// The state shared across every pipeline stage for one compiler run.
#[derive(Debug, Default)]
pub struct CompileSession {
    /// Module name -> its parsed, public-surface-extracted info (§3.1, §4.3).
    pub modules: HashMap<String, ModuleInfo>,
    /// Class name -> layout (§3.4, §9).
    pub classes: HashMap<String, ClassInfo>,
    /// Variable name -> the class it was constructed as (§3.4).
    pub objects: HashMap<String, String>,
    /// Function name -> its declaration (§3.4).
    pub functions: HashMap<String, FunctionInfo>,
    /// List variable name -> element type, to choose `strcpy` vs. direct
    /// assignment at index-assignment sites (§3.4).
    pub arrays: HashMap<String, Type>,
    /// Map variable name -> (key type, value type). Not one of the
    /// spec's four named tables, but built the same way (a pre-emit
    /// walk, read-only during emission) and for the same reason: a
    /// `obj.put(k, v)` method call needs to know whether `obj` is a
    /// map (linear-search insert, §4.6) or an ordinary object without
    /// re-deriving that from the opaque call-site text.
    pub maps: HashMap<String, (Type, Type)>,
    /// The module currently being resolved/emitted, if any (§9).
    pub current_module: Option<String>,
    /// The class currently being emitted, if inside a method body (§9).
    /// Scoped per-method by the emitter rather than left to persist across
    /// method boundaries — see DESIGN.md's note on Design Note 9's open
    /// question.
    pub current_class: Option<String>,
}

impl CompileSession {
    pub fn new() -> Self {
        Self::default()
    }
}
