use super::{Position, Statement, Type, Visibility};
use crate::ast::function::Parameter;

/// Field-init statements permitted in a constructor body (§3.2): `VarDecl`,
/// `VarAssign`, `Print`, or anything else the emitter can lower. We don't
/// narrow the type here — the parser only ever produces statements the
/// emitter accepts, and a stray unsupported statement surfaces as an
/// emitter-time warning rather than a second, parallel statement type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub params: Vec<Parameter>,
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub constructor: Option<Constructor>,
    pub methods: Vec<Method>,
    pub visibility: Visibility,
    pub position: Position,
}
