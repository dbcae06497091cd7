use super::{Expression, Position};

/// The payload shared by `Print` and `Put` (§3.2): either a bare string
/// literal, or a format string followed by the expressions it interpolates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintStmt {
    pub parts: Vec<Expression>,
    pub position: Position,
}

impl PrintStmt {
    pub fn new(parts: Vec<Expression>, position: Position) -> Self {
        Self { parts, position }
    }

    /// A `print "literal"` / `put "literal"` with nothing to interpolate.
    pub fn is_plain_literal(&self) -> bool {
        self.parts.len() == 1 && self.parts[0].is_string_literal()
    }
}
