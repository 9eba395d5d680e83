use std::fmt;

use small_ast::{Expression, ProgramPoint};

/// Which branch an edge belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeCase {
    /// Taken when the source's condition holds.
    True,
    /// Taken when the source's condition fails.
    False,
    /// Unconditional sequencing.
    Fallthrough,
}

impl fmt::Display for EdgeCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeCase::True => f.write_str("true"),
            EdgeCase::False => f.write_str("false"),
            EdgeCase::Fallthrough => f.write_str("fallthrough"),
        }
    }
}

/// Edge weight: the condition that holds when the edge is taken.
///
/// `False` edges already carry the negated condition, so consumers never need
/// to look at `case` to interpret `condition`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CfgEdge {
    pub condition: Expression,
    pub case: EdgeCase,
}

impl CfgEdge {
    pub fn new(condition: Expression, case: EdgeCase) -> Self {
        Self { condition, case }
    }

    pub fn fallthrough() -> Self {
        Self::new(Expression::BoolConstant(true), EdgeCase::Fallthrough)
    }

    pub fn is_conditional(&self) -> bool {
        self.case != EdgeCase::Fallthrough
    }
}

/// A pending edge out of a built subgraph, waiting for the statement that
/// follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exit {
    pub point: ProgramPoint,
    pub condition: Expression,
    pub case: EdgeCase,
}

impl Exit {
    pub fn new(point: ProgramPoint, condition: Expression, case: EdgeCase) -> Self {
        Self {
            point,
            condition,
            case,
        }
    }

    pub fn fallthrough(point: ProgramPoint) -> Self {
        Self::new(point, Expression::BoolConstant(true), EdgeCase::Fallthrough)
    }

    pub fn edge(&self) -> CfgEdge {
        CfgEdge::new(self.condition.clone(), self.case)
    }
}
