//! Module loader (§4.3): resolves an import name to a file, parses it
//! recursively, and exposes only its `pub` declarations.
//!
//! The process-wide module registry the spec describes lives on
//! `CompileSession::modules` rather than as a module-level static (§9,
//! "Process-wide tables"): this function takes the session by `&mut`
//! and inserts into it directly, so a second lookup of the same name
//! is the memoized-return the spec requires.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::ast::{ClassDecl, FunctionDecl, Statement, VarDeclInferredStmt, VarDeclStmt};
use crate::cleaner::clean;
use crate::error::{CompileError, CompileResult};
use crate::hoister::hoist;
use crate::parser::parse_program;
use crate::session::CompileSession;

/// A public variable declaration, in either its typed or inferred form
/// (§3.2): both are exposed the same way by a module's public surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicVar {
    Typed(VarDeclStmt),
    Inferred(VarDeclInferredStmt),
}

/// A module's public surface (§3.1): maps from name to declaration,
/// populated only from statements marked `pub` in its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub vars: HashMap<String, PublicVar>,
    pub classes: HashMap<String, ClassDecl>,
    pub functions: HashMap<String, FunctionDecl>,
}

/// Resolve `module_name` to a file under `base_dir`, parse it (after
/// cleaning and hoisting), and return its public surface. If the
/// session already holds this module, returns the cached entry without
/// touching the filesystem (module memoization, §3.1, §8).
pub fn load_module(
    session: &mut CompileSession,
    module_name: &str,
    base_dir: &Path,
) -> CompileResult<ModuleInfo> {
    if let Some(existing) = session.modules.get(module_name) {
        trace!("module '{module_name}' already loaded, returning cached entry");
        return Ok(existing.clone());
    }

    debug!("loading module '{module_name}' relative to '{}'", base_dir.display());
    let path = resolve_module_path(module_name, base_dir)?;

    let bytes = std::fs::read_to_string(&path)
        .map_err(|source| CompileError::Io { path: path.clone(), source })?;
    let cleaned = clean(&bytes);
    let file_label = path.to_string_lossy().into_owned();
    let program = parse_program(&cleaned, &file_label)?;
    let statements = hoist(program.statements)?;

    let info = extract_public_surface(module_name, &statements);
    session.modules.insert(module_name.to_owned(), info.clone());

    // Recursively load this module's own imports so transitive public
    // surfaces are available to the resolver before emission.
    for import in &program.imports {
        let nested_base = path.parent().unwrap_or(Path::new("."));
        load_module(session, &import.module_name, nested_base)?;
    }

    Ok(info)
}

/// Resolution policy (§4.3): `std/`-prefixed names resolve against the
/// executable's own directory; everything else is tried, in order,
/// against `base_dir`, `base_dir/modules`, and the current directory.
fn resolve_module_path(module_name: &str, base_dir: &Path) -> CompileResult<PathBuf> {
    if let Some(std_name) = module_name.strip_prefix("std/") {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        let candidate = exe_dir.join("lib").join(format!("{std_name}.scar"));
        if candidate.exists() {
            return Ok(candidate);
        }
        return Err(CompileError::ModuleNotFound { name: module_name.to_owned() });
    }

    let candidates = [
        base_dir.join(format!("{module_name}.scar")),
        base_dir.join("modules").join(format!("{module_name}.scar")),
        PathBuf::from(format!("{module_name}.scar")),
    ];

    for candidate in candidates {
        trace!("trying module candidate path '{}'", candidate.display());
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(CompileError::ModuleNotFound { name: module_name.to_owned() })
}

/// Walk a module's top-level statements and collect only those marked
/// `pub`, by declaration kind (§3.1, §4.3).
fn extract_public_surface(module_name: &str, statements: &[Statement]) -> ModuleInfo {
    let mut info = ModuleInfo { name: module_name.to_owned(), ..Default::default() };

    for statement in statements {
        if !statement.is_public() {
            continue;
        }
        match statement {
            Statement::VarDecl(v) => {
                info.vars.insert(v.name.clone(), PublicVar::Typed(v.clone()));
            }
            Statement::VarDeclInferred(v) => {
                info.vars.insert(v.name.clone(), PublicVar::Inferred(v.clone()));
            }
            Statement::ClassDecl(c) => {
                info.classes.insert(c.name.clone(), c.clone());
            }
            Statement::TopLevelFuncDecl(f) => {
                info.functions.insert(f.name.clone(), f.clone());
            }
            // ListDecl/MapDecl/ObjectDecl/VarDeclMethodCall can also be
            // marked `pub`, but the resolver and emitter only ever look
            // up module members as vars, classes, or functions (§4.5);
            // other public declarations are still emitted locally, just
            // not exposed cross-module.
            _ => {}
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_module(dir: &Path, name: &str, source: &str) -> PathBuf {
        let path = dir.join(format!("{name}.scar"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(source.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_only_pub_declarations() {
        let dir = tempfile_dir();
        write_module(
            &dir,
            "shapes",
            "pub var int sides = 4\nvar int hidden = 1\n",
        );

        let mut session = CompileSession::new();
        let info = load_module(&mut session, "shapes", &dir).unwrap();
        assert!(info.vars.contains_key("sides"));
        assert!(!info.vars.contains_key("hidden"));
    }

    #[test]
    fn second_load_returns_cached_entry() {
        let dir = tempfile_dir();
        write_module(&dir, "shapes", "pub var int sides = 4\n");

        let mut session = CompileSession::new();
        let first = load_module(&mut session, "shapes", &dir).unwrap();
        let second = load_module(&mut session, "shapes", &dir).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_module_is_an_error() {
        let dir = tempfile_dir();
        let mut session = CompileSession::new();
        assert!(matches!(
            load_module(&mut session, "nope", &dir),
            Err(CompileError::ModuleNotFound { .. })
        ));
    }

    /// A process-unique scratch directory under the system temp dir; no
    /// external crate is needed for this since we only ever create a
    /// handful of small files per test run.
    fn tempfile_dir() -> PathBuf {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("scarc-loader-test-{}-{id}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
