use std::fmt::Debug;

use small_ast::{Expression, ProgramPoint, Statement};
use small_lattice::{AbstractEnvironment, Bindings};

use crate::AnalysisError;

/// Transfer function for assignments.
///
/// Implementations match the right-hand side against a priority-ordered rule
/// table and return the changed variables together with the rule that fired.
pub trait FlowFunction {
    type Value: Clone + PartialEq + Debug;
    /// Identifies the rule that produced a result, for tracing.
    type Rule: Copy + Debug;

    /// Apply the statement to `env`. Only assignments are supported; any
    /// other statement is an [`AnalysisError::UnsupportedStatement`].
    fn get_variables(
        &self,
        statement: &Statement,
        env: &AbstractEnvironment<Self::Value>,
    ) -> Result<(Bindings<Self::Value>, Self::Rule), AnalysisError>;
}

/// Transfer function for a whole program point.
pub trait ControlFlowFunction {
    type Value: Clone + PartialEq + Debug;
    type Rule: Copy + Debug;

    fn get_variables(
        &self,
        point: &ProgramPoint,
        env: &AbstractEnvironment<Self::Value>,
    ) -> Result<(Bindings<Self::Value>, Self::Rule), AnalysisError>;
}

/// Narrows an environment along a conditional edge.
pub trait ConditionUpdateFunction {
    type Value: Clone + PartialEq + Debug;
    type Rule: Copy + Debug;

    /// Returns the narrowed variables, or `None` when no state can satisfy
    /// `condition`. Conditions without a rule return an empty update.
    fn get_variables(
        &self,
        condition: &Expression,
        env: &AbstractEnvironment<Self::Value>,
    ) -> (Option<Bindings<Self::Value>>, Self::Rule);
}

/// Build the error a flow function reports for a statement it cannot handle.
pub fn unsupported(statement: &Statement) -> AnalysisError {
    AnalysisError::UnsupportedStatement {
        line: statement.line(),
        statement: statement.header(),
    }
}

// ============================================================================
// Statement dispatch
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlowRule<R> {
    /// The point is an assignment; the flow function's rule fired.
    Assignment(R),
    /// `if`, `while` and `return` leave the environment unchanged. Their
    /// effect lives on their outgoing edges.
    Passthrough,
}

/// The control-flow function shared by every analysis: assignments go to the
/// flow function, all other statements pass their input through.
#[derive(Clone, Debug, Default)]
pub struct StatementDispatch<F> {
    flow: F,
}

impl<F> StatementDispatch<F> {
    pub fn new(flow: F) -> Self {
        Self { flow }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }
}

impl<F: FlowFunction> ControlFlowFunction for StatementDispatch<F> {
    type Value = F::Value;
    type Rule = ControlFlowRule<F::Rule>;

    fn get_variables(
        &self,
        point: &ProgramPoint,
        env: &AbstractEnvironment<Self::Value>,
    ) -> Result<(Bindings<Self::Value>, Self::Rule), AnalysisError> {
        match point.statement() {
            statement @ Statement::Assignment { .. } => {
                let (bindings, rule) = self.flow.get_variables(statement, env)?;
                Ok((bindings, ControlFlowRule::Assignment(rule)))
            }
            Statement::IfElse { .. } | Statement::While { .. } | Statement::Return { .. } => {
                Ok((Bindings::new(), ControlFlowRule::Passthrough))
            }
        }
    }
}
