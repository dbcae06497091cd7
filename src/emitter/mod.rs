//! C emitter orchestration (§4.6): assembles the ten-section output
//! order from a pre-walked session plus the loaded modules' resolver
//! context.

pub mod class;
pub mod context;
pub mod expr;
pub mod function;
pub mod globals;
pub mod layout;
pub mod prewalk;
pub mod statements;
pub mod types;
pub mod util;

use std::collections::{HashMap, HashSet};

use crate::ast::{Program, Statement};
use crate::emit_line;
use crate::emitter::context::EmitCtx;
use crate::resolver::ResolverContext;
use crate::session::CompileSession;

const PRELUDE: &str = "#include <stdio.h>\n#include <string.h>\n#include <unistd.h>\n#include <omp.h>\n#include <stdlib.h>\n#include <stdbool.h>\n\nint _exception = 0;\n";

/// Emit the full C translation of `program`. `session` must already have
/// been through `prewalk` (§3.4), and `resolver` built from every module
/// reachable from `session.modules` (§4.5).
pub fn emit(session: &CompileSession, resolver: &ResolverContext<'_>, program: &Program) -> String {
    let mut out = String::new();
    out.push_str(PRELUDE);
    out.push('\n');

    let class_names = ordered_names(&program.statements, &session.classes, class_decl_name);
    let function_names = ordered_names(&program.statements, &session.functions, function_decl_name);

    // 2. Forward struct declarations.
    for name in &class_names {
        class::emit_forward_decl(&mut out, name);
    }
    out.push('\n');

    // 3. `typedef struct X X;`
    for name in &class_names {
        class::emit_typedef(&mut out, name);
    }
    out.push('\n');

    // 4. Full struct definitions.
    for name in &class_names {
        class::emit_struct(&mut out, &session.classes[name], session);
        out.push('\n');
    }

    // 5-6. Constructor and function prototypes.
    for name in &class_names {
        let info = &session.classes[name];
        class::emit_constructor_prototype(&mut out, info, session);
        class::emit_method_prototypes(&mut out, info, session);
    }
    for name in &function_names {
        function::emit_prototype(&mut out, &session.functions[name].decl, session);
    }
    out.push('\n');

    let ctx = EmitCtx::new(session, resolver);

    // 7. Globals and their `init_*` initializers.
    let init_calls = globals::emit_globals(&mut out, program, &ctx);

    // 8. Class implementations.
    for name in &class_names {
        let info = &session.classes[name];
        class::emit_constructor(&mut out, info, &ctx);
        for method in &info.decl.methods {
            class::emit_method(&mut out, &info.decl.name, method, &ctx);
        }
        out.push('\n');
    }

    // 9. Top-level function implementations.
    for name in &function_names {
        function::emit_function(&mut out, &session.functions[name].decl, &ctx);
        out.push('\n');
    }

    // 10. `main()`.
    emit_main(&mut out, program, &init_calls, &ctx);

    out
}

/// The names present in `table`, ordered the way `hoist()` left them in
/// `statements` (callees before callers, §4.4) rather than the
/// alphabetical order `HashMap::keys()` would give. Names in `table` but
/// absent from `statements` (declarations pulled in from an imported
/// module, §4.5) are appended afterwards in a stable, sorted order, since
/// no hoisted position exists for them.
fn ordered_names<T>(
    statements: &[Statement],
    table: &HashMap<String, T>,
    decl_name: fn(&Statement) -> Option<&str>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for statement in statements {
        if let Some(name) = decl_name(statement) {
            if table.contains_key(name) && seen.insert(name.to_owned()) {
                names.push(name.to_owned());
            }
        }
    }
    let mut rest: Vec<&String> = table.keys().filter(|name| !seen.contains(name.as_str())).collect();
    rest.sort();
    names.extend(rest.into_iter().cloned());
    names
}

fn class_decl_name(statement: &Statement) -> Option<&str> {
    match statement {
        Statement::ClassDecl(class) => Some(&class.name),
        _ => None,
    }
}

fn function_decl_name(statement: &Statement) -> Option<&str> {
    match statement {
        Statement::TopLevelFuncDecl(function) => Some(&function.name),
        _ => None,
    }
}

fn emit_main(out: &mut String, program: &Program, init_calls: &[String], ctx: &EmitCtx<'_>) {
    out.push_str("int main(void) {\n");
    for name in init_calls {
        emit_line!(out, 1, "init_{name}();");
    }
    for statement in &program.statements {
        if matches!(statement, Statement::ClassDecl(_) | Statement::TopLevelFuncDecl(_) | Statement::Import(_)) {
            continue;
        }
        if globals::is_exported_declaration(statement) {
            continue;
        }
        statements::emit_statement(out, 1, statement, ctx);
    }
    out.push_str("    return 0;\n}\n");
}
