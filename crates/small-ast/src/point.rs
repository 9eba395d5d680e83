use std::fmt;
use std::sync::Arc;

use crate::stmt::Statement;

/// A location in a function: the statement that begins there.
///
/// Identity is structural. Two points are the same node when their line and
/// whole statement tree agree, so independently built subgraphs that mention
/// the same statement share a node once merged. The statement sits behind an
/// [`Arc`] so points clone cheaply.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramPoint {
    line: usize,
    statement: Arc<Statement>,
}

impl ProgramPoint {
    pub fn new(statement: Statement) -> Self {
        Self {
            line: statement.line(),
            statement: Arc::new(statement),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}

impl From<&Statement> for ProgramPoint {
    fn from(statement: &Statement) -> Self {
        Self::new(statement.clone())
    }
}

impl fmt::Display for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.statement.header())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::Expression;

    #[test]
    fn test_points_with_equal_statements_are_identical() {
        let stmt = Statement::assign(1, "x", Expression::int(0));
        let a = ProgramPoint::from(&stmt);
        let b = ProgramPoint::new(stmt.clone());
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_line_different_statement_differs() {
        let a = ProgramPoint::new(Statement::assign(1, "x", Expression::int(0)));
        let b = ProgramPoint::new(Statement::assign(1, "x", Expression::int(1)));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "1: x = 0");
    }
}
