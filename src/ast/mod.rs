//! The core AST (§3): a `Program` of imports and statements, where
//! `Statement` is a true sum type (see `statement.rs` for why that departs
//! from the source's tagged-union-with-one-populated-field approach) and
//! expressions stay opaque text (§3.3).

pub mod call;
pub mod class;
pub mod control_flow;
pub mod declaration;
pub mod expression;
pub mod function;
pub mod import;
pub mod position;
pub mod print;
pub mod program;
pub mod statement;
pub mod types;
pub mod visibility;

pub use call::{FunctionCallStmt, MethodCallStmt, VarAssignMethodCallStmt, VarDeclMethodCallStmt};
pub use class::{ClassDecl, Constructor, Method};
pub use control_flow::{ElifBranch, ForStmt, IfStmt, TryCatchStmt, WhileStmt};
pub use declaration::{
    ListDeclStmt, MapDeclStmt, ObjectDeclStmt, VarAssignStmt, VarDeclInferredStmt, VarDeclStmt,
};
pub use expression::{Expression, InferredType};
pub use function::{FunctionDecl, Parameter, ReturnStmt};
pub use import::Import;
pub use position::Position;
pub use print::PrintStmt;
pub use program::Program;
pub use statement::Statement;
pub use types::Type;
pub use visibility::Visibility;
