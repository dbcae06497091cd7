//! Source positions.
//!
//! A position is (file, line). Columns are not tracked: the core spec only
//! promises stable line numbers across cleaning, and expressions are opaque
//! text rather than a token stream with column spans.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub file: String,
    pub line: usize,
}

impl Position {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self { file: file.into(), line }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
