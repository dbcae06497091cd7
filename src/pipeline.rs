//! The full source-to-C pipeline (§5): clean, parse, load imports,
//! hoist, pre-walk, resolve, emit, post-process. Shared by the CLI and
//! by in-process tests, so neither re-implements the stage ordering.

use std::path::Path;

use log::info;

use crate::ast::Program;
use crate::cleaner::clean;
use crate::emitter;
use crate::emitter::prewalk::prewalk;
use crate::error::CompileResult;
use crate::hoister::hoist;
use crate::loader::{load_module, ModuleInfo};
use crate::macros::postprocess;
use crate::parser::parse_program;
use crate::resolver::ResolverContext;
use crate::session::CompileSession;

/// One compiled unit: the final C text plus the session state it was
/// produced from, in case a caller (the CLI's `--dump-*` flags, or a
/// test) wants an intermediate artifact instead.
pub struct CompileOutput {
    pub cleaned: String,
    pub program: Program,
    pub c_source: String,
}

/// Compile the file at `path` into ANSI C text, following every
/// `import` it transitively reaches relative to its own directory
/// (§4.3).
pub fn compile_file(path: &Path) -> CompileResult<CompileOutput> {
    let bytes = std::fs::read_to_string(path).map_err(|source| crate::error::CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_label = path.to_string_lossy().into_owned();
    compile_source(&bytes, &file_label, base_dir)
}

/// Compile already-read `source` text, attributing diagnostics to
/// `file_label` and resolving its `import`s relative to `base_dir`.
/// This is the entry point in-process tests use directly (§A.5), since
/// they rarely have a real file on disk to point `compile_file` at.
pub fn compile_source(source: &str, file_label: &str, base_dir: &Path) -> CompileResult<CompileOutput> {
    let (cleaned, program, session) = run_front_half(source, file_label, base_dir)?;

    let modules: Vec<ModuleInfo> = session.modules.values().cloned().collect();
    let resolver = ResolverContext::new(&modules);

    info!("emitting C for '{file_label}'");
    let emitted = emitter::emit(&session, &resolver, &program);
    let c_source = postprocess(&emitted);

    Ok(CompileOutput { cleaned, program, c_source })
}

/// Run cleaning, parsing, import loading, hoisting, and pre-walking,
/// but stop short of resolution and emission (the `check` subcommand,
/// §A.2: "fast validation" that never produces C).
pub fn check_file(path: &Path) -> CompileResult<Program> {
    let bytes = std::fs::read_to_string(path).map_err(|source| crate::error::CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_label = path.to_string_lossy().into_owned();
    let (_, program, _) = run_front_half(&bytes, &file_label, base_dir)?;
    Ok(program)
}

fn run_front_half(source: &str, file_label: &str, base_dir: &Path) -> CompileResult<(String, Program, CompileSession)> {
    let mut session = CompileSession::new();

    info!("cleaning '{file_label}'");
    let cleaned = clean(source);

    let program = parse_program(&cleaned, file_label)?;
    let hoisted_statements = hoist(program.statements)?;
    let program = Program::new(program.imports, hoisted_statements);

    for import in &program.imports {
        load_module(&mut session, &import.module_name, base_dir)?;
    }

    prewalk(&mut session, &program);

    Ok((cleaned, program, session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_trivial_program_to_c_containing_main() {
        let out = compile_source("put \"hi\"\n", "t.scar", Path::new(".")).unwrap();
        assert!(out.c_source.contains("int main(void)"));
        assert!(out.c_source.contains("hi"));
    }
}
