//! Pre-emit walk (§3.4): populates the session's four read-mostly
//! tables from the local program plus every loaded module, before
//! emission begins reading them.

use log::trace;

use crate::ast::{ClassDecl, FunctionDecl, Program, Statement};
use crate::emitter::layout::collect_fields;
use crate::session::{ClassInfo, CompileSession, FunctionInfo};

pub fn prewalk(session: &mut CompileSession, program: &Program) {
    register_class(session, None, program.statements.iter());
    register_functions(session, None, &program.statements);

    let modules: Vec<_> = session.modules.values().cloned().collect();
    for module in &modules {
        for class in module.classes.values() {
            register_one_class(session, class);
        }
        for function in module.functions.values() {
            let flat_name = format!("{}_{}", module.name, function.name);
            let mut qualified = function.clone();
            qualified.name = flat_name.clone();
            session.functions.insert(flat_name, FunctionInfo { decl: qualified });
        }
    }

    collect_objects_and_arrays(session, &program.statements);
}

fn register_class<'a>(
    session: &mut CompileSession,
    _current_module: Option<&str>,
    statements: impl Iterator<Item = &'a Statement>,
) {
    for statement in statements {
        if let Statement::ClassDecl(class) = statement {
            register_one_class(session, class);
        }
    }
}

fn register_one_class(session: &mut CompileSession, class: &ClassDecl) {
    trace!("registering class '{}' ({} field(s) pending layout)", class.name, class.constructor.is_some() as u8);
    let fields = collect_fields(class);
    session
        .classes
        .insert(class.name.clone(), ClassInfo { decl: class.clone(), fields });
}

fn register_functions(session: &mut CompileSession, _current_module: Option<&str>, statements: &[Statement]) {
    for statement in statements {
        if let Statement::TopLevelFuncDecl(f) = statement {
            register_one_function(session, f);
        }
    }
}

fn register_one_function(session: &mut CompileSession, function: &FunctionDecl) {
    trace!("registering function '{}'", function.name);
    session.functions.insert(function.name.clone(), FunctionInfo { decl: function.clone() });
}

/// Recursively collect every `ObjectDecl` (-> `ObjectInfo`), `ListDecl`
/// (-> `ArrayInfo`), and `MapDecl` (-> the map table, §9) in the
/// program, wherever they occur: top level, inside function/method
/// bodies, or inside control-flow bodies.
fn collect_objects_and_arrays(session: &mut CompileSession, statements: &[Statement]) {
    for statement in statements {
        match statement {
            Statement::ObjectDecl(o) => {
                session.objects.insert(o.name.clone(), o.class_name.clone());
            }
            Statement::ListDecl(l) => {
                session.arrays.insert(l.name.clone(), l.elem_type.clone());
            }
            Statement::MapDecl(m) => {
                session.maps.insert(m.name.clone(), (m.key_type.clone(), m.value_type.clone()));
            }
            Statement::While(w) => collect_objects_and_arrays(session, &w.body),
            Statement::For(f) => collect_objects_and_arrays(session, &f.body),
            Statement::If(i) => {
                collect_objects_and_arrays(session, &i.body);
                for elif in &i.elifs {
                    collect_objects_and_arrays(session, &elif.body);
                }
                if let Some(else_body) = &i.else_body {
                    collect_objects_and_arrays(session, else_body);
                }
            }
            Statement::TryCatch(t) => {
                collect_objects_and_arrays(session, &t.try_body);
                collect_objects_and_arrays(session, &t.catch_body);
            }
            Statement::TopLevelFuncDecl(f) => collect_objects_and_arrays(session, &f.body),
            Statement::ClassDecl(c) => {
                if let Some(ctor) = &c.constructor {
                    collect_objects_and_arrays(session, &ctor.body);
                }
                for method in &c.methods {
                    collect_objects_and_arrays(session, &method.body);
                }
            }
            _ => {}
        }
    }
}
