/// Errors that abort an analysis run.
///
/// Imprecision is never an error: transfer functions answer top when they
/// know nothing, and infeasible branches are ordinary results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// A transfer function was handed a statement it has no rule for. This
    /// is a gap in the analysis definition.
    #[error("no transfer rule for statement at line {line}: {statement}")]
    UnsupportedStatement { line: usize, statement: String },
    /// The worklist did not drain within the configured budget. Either the
    /// lattice is not monotone or widening does not bound the iteration.
    #[error("fixpoint not reached within {limit} iterations")]
    IterationLimitExceeded { limit: usize },
}

impl AnalysisError {
    /// `true` for failures caused by a malformed lattice or widening setup
    /// rather than by a missing transfer rule.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::IterationLimitExceeded { .. })
    }
}
