//! The error kinds the compiler core distinguishes.
//!
//! Every fallible pipeline stage returns `Result<_, CompileError>`. Errors are
//! never recovered: the first one aborts the pipeline and carries the line
//! number at which it was detected, matching the "first error aborts" policy
//! of the core.

use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CompileError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    ModuleNotFound {
        name: String,
    },
    Indentation {
        line: usize,
        expected: usize,
        got: usize,
    },
    Syntax {
        line: usize,
        message: String,
    },
    UnknownStatement {
        line: usize,
        text: String,
    },
    DuplicateFunction {
        name: String,
    },
    CircularDependency {
        path: Vec<String>,
    },
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io { path, source } => {
                write!(f, "could not read '{}': {source}", path.display())
            }
            CompileError::ModuleNotFound { name } => {
                write!(f, "module '{name}' could not be resolved to any candidate path")
            }
            CompileError::Indentation { line, expected, got } => write!(
                f,
                "indentation error at line {line}: expected indent {expected}, got {got}"
            ),
            CompileError::Syntax { line, message } => {
                write!(f, "syntax error at line {line}: {message}")
            }
            CompileError::UnknownStatement { line, text } => {
                write!(f, "unknown statement at line {line}: '{text}'")
            }
            CompileError::DuplicateFunction { name } => {
                write!(f, "function '{name}' is declared more than once")
            }
            CompileError::CircularDependency { path } => {
                write!(f, "circular dependency among functions: {}", path.join(" -> "))
            }
        }
    }
}

impl std::error::Error for CompileError {}

pub type CompileResult<T> = Result<T, CompileError>;
