use super::{Expression, Position, Type, Visibility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCallStmt {
    pub object: String,
    pub method: String,
    pub args: Vec<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclMethodCallStmt {
    pub ty: Option<Type>,
    pub name: String,
    pub object: String,
    pub method: String,
    pub args: Vec<Expression>,
    pub visibility: Visibility,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarAssignMethodCallStmt {
    pub name: String,
    pub object: String,
    pub method: String,
    pub args: Vec<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallStmt {
    pub name: String,
    pub args: Vec<Expression>,
    pub position: Position,
}
