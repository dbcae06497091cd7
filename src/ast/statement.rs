use super::{
    call::{FunctionCallStmt, MethodCallStmt, VarAssignMethodCallStmt, VarDeclMethodCallStmt},
    class::ClassDecl,
    control_flow::{ForStmt, IfStmt, TryCatchStmt, WhileStmt},
    declaration::{
        ListDeclStmt, MapDeclStmt, ObjectDeclStmt, VarAssignStmt, VarDeclInferredStmt,
        VarDeclStmt,
    },
    function::{FunctionDecl, ReturnStmt},
    import::Import,
    print::PrintStmt,
    Expression, Position,
};

/// The core AST's statement sum type. Every statement kind from §3.2 is a
/// distinct variant — the source repo's single struct with one populated
/// field per kind is replaced with a real `enum` so a `match` over statement
/// kinds is exhaustiveness-checked and the payload comes along for free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Import(Import),
    Print(PrintStmt),
    Put(PrintStmt),
    Sleep(Expression),
    While(WhileStmt),
    For(ForStmt),
    If(IfStmt),
    Break(Position),
    Continue(Position),
    VarDecl(VarDeclStmt),
    VarDeclInferred(VarDeclInferredStmt),
    VarAssign(VarAssignStmt),
    ListDecl(ListDeclStmt),
    MapDecl(MapDeclStmt),
    ClassDecl(ClassDecl),
    ObjectDecl(ObjectDeclStmt),
    MethodCall(MethodCallStmt),
    VarDeclMethodCall(VarDeclMethodCallStmt),
    VarAssignMethodCall(VarAssignMethodCallStmt),
    FunctionCall(FunctionCallStmt),
    TopLevelFuncDecl(FunctionDecl),
    Return(ReturnStmt),
    Throw(Expression),
    TryCatch(TryCatchStmt),
    RawCode { text: String, position: Position },
}

impl Statement {
    pub fn position(&self) -> &Position {
        match self {
            Statement::Import(s) => &s.position,
            Statement::Print(s) | Statement::Put(s) => &s.position,
            Statement::Sleep(e) => &e.position,
            Statement::While(s) => &s.position,
            Statement::For(s) => &s.position,
            Statement::If(s) => &s.position,
            Statement::Break(p) | Statement::Continue(p) => p,
            Statement::VarDecl(s) => &s.position,
            Statement::VarDeclInferred(s) => &s.position,
            Statement::VarAssign(s) => &s.position,
            Statement::ListDecl(s) => &s.position,
            Statement::MapDecl(s) => &s.position,
            Statement::ClassDecl(s) => &s.position,
            Statement::ObjectDecl(s) => &s.position,
            Statement::MethodCall(s) => &s.position,
            Statement::VarDeclMethodCall(s) => &s.position,
            Statement::VarAssignMethodCall(s) => &s.position,
            Statement::FunctionCall(s) => &s.position,
            Statement::TopLevelFuncDecl(s) => &s.position,
            Statement::Return(s) => &s.position,
            Statement::Throw(e) => &e.position,
            Statement::TryCatch(s) => &s.position,
            Statement::RawCode { position, .. } => position,
        }
    }

    /// Whether this statement, if it is a declaration, was marked `pub`. Any
    /// non-declaration statement (control flow, calls, ...) is never public.
    pub fn is_public(&self) -> bool {
        match self {
            Statement::VarDecl(s) => s.visibility.is_public(),
            Statement::VarDeclInferred(s) => s.visibility.is_public(),
            Statement::ListDecl(s) => s.visibility.is_public(),
            Statement::MapDecl(s) => s.visibility.is_public(),
            Statement::ClassDecl(s) => s.visibility.is_public(),
            Statement::ObjectDecl(s) => s.visibility.is_public(),
            Statement::VarDeclMethodCall(s) => s.visibility.is_public(),
            Statement::TopLevelFuncDecl(s) => s.visibility.is_public(),
            _ => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Statement::VarDecl(s) => Some(&s.name),
            Statement::VarDeclInferred(s) => Some(&s.name),
            Statement::ListDecl(s) => Some(&s.name),
            Statement::MapDecl(s) => Some(&s.name),
            Statement::ClassDecl(s) => Some(&s.name),
            Statement::ObjectDecl(s) => Some(&s.name),
            Statement::VarDeclMethodCall(s) => Some(&s.name),
            Statement::TopLevelFuncDecl(s) => Some(&s.name),
            _ => None,
        }
    }
}
