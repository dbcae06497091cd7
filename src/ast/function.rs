use super::{Expression, Position, Type, Visibility};

/// A function or method parameter. The three surface forms from §4.2
/// (`type name`, `ref type name`, `list[T] name`) all collapse onto this one
/// shape: `list[T]` is just `ty = Type::List(T)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
    pub is_ref: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub body: Vec<super::Statement>,
    pub visibility: Visibility,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub position: Position,
}
