//! Struct field layout for a class (§3.4, §4.6): fields come from
//! constructor parameters plus `this.x = …` statements found anywhere
//! in the constructor body, deduplicated by first occurrence.

use crate::ast::{ClassDecl, Statement, Type};
use crate::resolver::infer_declared_type;

pub fn collect_fields(class: &ClassDecl) -> Vec<(String, Type, bool)> {
    let mut fields = vec![];
    let mut seen = std::collections::HashSet::new();

    let Some(constructor) = &class.constructor else { return fields };

    for param in &constructor.params {
        if seen.insert(param.name.clone()) {
            fields.push((param.name.clone(), param.ty.clone(), param.is_ref));
        }
    }

    for statement in &constructor.body {
        collect_field_inits(statement, &mut fields, &mut seen);
    }

    fields
}

fn collect_field_inits(
    statement: &Statement,
    fields: &mut Vec<(String, Type, bool)>,
    seen: &mut std::collections::HashSet<String>,
) {
    match statement {
        Statement::VarDecl(v) => {
            if let Some(field_name) = v.name.strip_prefix("this.") {
                if seen.insert(field_name.to_owned()) {
                    fields.push((field_name.to_owned(), v.ty.clone(), v.is_ref));
                }
            }
        }
        Statement::VarAssign(v) => {
            if let Some(field_name) = v.name.strip_prefix("this.") {
                if seen.insert(field_name.to_owned()) {
                    fields.push((field_name.to_owned(), infer_declared_type(&v.value), false));
                }
            }
        }
        Statement::If(i) => {
            i.body.iter().for_each(|s| collect_field_inits(s, fields, seen));
            for elif in &i.elifs {
                elif.body.iter().for_each(|s| collect_field_inits(s, fields, seen));
            }
            if let Some(else_body) = &i.else_body {
                else_body.iter().for_each(|s| collect_field_inits(s, fields, seen));
            }
        }
        Statement::While(w) => w.body.iter().for_each(|s| collect_field_inits(s, fields, seen)),
        Statement::For(f) => f.body.iter().for_each(|s| collect_field_inits(s, fields, seen)),
        Statement::TryCatch(t) => {
            t.try_body.iter().for_each(|s| collect_field_inits(s, fields, seen));
            t.catch_body.iter().for_each(|s| collect_field_inits(s, fields, seen));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Constructor, Expression, Parameter, Position, Visibility};

    fn pos() -> Position {
        Position::new("t.scar", 1)
    }

    #[test]
    fn fields_come_from_params_then_this_assignments() {
        let class = ClassDecl {
            name: "Cat".into(),
            constructor: Some(Constructor {
                params: vec![Parameter { ty: Type::named("string"), name: "name".into(), is_ref: false, position: pos() }],
                body: vec![Statement::VarDecl(crate::ast::VarDeclStmt {
                    ty: Type::named("int"),
                    name: "this.lives".into(),
                    value: Expression::new("9", pos()),
                    is_ref: false,
                    visibility: Visibility::Private,
                    position: pos(),
                })],
                position: pos(),
            }),
            methods: vec![],
            visibility: Visibility::Private,
            position: pos(),
        };

        let fields = collect_fields(&class);
        assert_eq!(fields, vec![
            ("name".to_owned(), Type::named("string"), false),
            ("lives".to_owned(), Type::named("int"), false),
        ]);
    }

    #[test]
    fn dedups_by_first_occurrence() {
        let class = ClassDecl {
            name: "Cat".into(),
            constructor: Some(Constructor {
                params: vec![Parameter { ty: Type::named("string"), name: "name".into(), is_ref: false, position: pos() }],
                body: vec![Statement::VarAssign(crate::ast::VarAssignStmt {
                    name: "this.name".into(),
                    value: Expression::new("\"x\"", pos()),
                    position: pos(),
                })],
                position: pos(),
            }),
            methods: vec![],
            visibility: Visibility::Private,
            position: pos(),
        };

        let fields = collect_fields(&class);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].1, Type::named("string"));
    }
}
