use super::{Expression, Position, Type, Visibility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclStmt {
    pub ty: Type,
    pub name: String,
    pub value: Expression,
    pub is_ref: bool,
    pub visibility: Visibility,
    pub position: Position,
}

/// `VarDeclInferred`: the declared type is chosen later by the literal-shape
/// heuristic of §4.5 (`Expression::infer_type`), not written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclInferredStmt {
    pub name: String,
    pub value: Expression,
    pub visibility: Visibility,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarAssignStmt {
    pub name: String,
    pub value: Expression,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDeclStmt {
    pub elem_type: Type,
    pub name: String,
    pub elements: Vec<Expression>,
    pub visibility: Visibility,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDeclStmt {
    pub key_type: Type,
    pub value_type: Type,
    pub name: String,
    pub pairs: Vec<(Expression, Expression)>,
    pub visibility: Visibility,
    pub position: Position,
}

/// `Type name = new Class(args)`, where `Type`/`Class` may be
/// module-qualified (`Type name = new module.Class(args)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDeclStmt {
    pub class_name: String,
    pub name: String,
    pub args: Vec<Expression>,
    pub visibility: Visibility,
    pub position: Position,
}
