use small_analysis::{AbstractEnvironment, AnalysisError, Bindings, FlowFunction, unsupported};
use small_ast::{Expression, IntBinaryOperator, Statement};

use crate::{ZeroLattice, ZeroValue};

/// Which assignment rule fired. Rows are tried in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeroFlowRule {
    /// `x = 0`
    ZeroConstant,
    /// `x = c` with `c != 0`, or a boolean constant.
    NonZeroConstant,
    /// `x = y`
    Copy,
    /// `x = c op d` folding to zero.
    ConstantFoldZero,
    /// `x = c op d` folding to a non-zero value.
    ConstantFoldNonZero,
    /// `x = c op d` overflowing or dividing by zero.
    ConstantFoldUndefined,
    /// `x = y + z` with both operands zero.
    AddZeroVariables,
    /// `x = y + z` otherwise.
    AddVariables,
    /// `x = y + 0` with `y` zero.
    AddZeroToZero,
    /// `x = y + c` with `y` zero and `c != 0`.
    AddNonZeroToZero,
    /// `x = y + 0` with `y` non-zero.
    AddZeroToNonZero,
    /// `x = y + c` otherwise.
    AddConstant,
    /// `x = c + y`, answered by the `y + c` rows.
    CommutedAdd,
    /// Any other right-hand side.
    Unknown,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroFlow;

impl ZeroFlow {
    fn evaluate(
        &self,
        value: &Expression,
        env: &AbstractEnvironment<ZeroValue>,
    ) -> (ZeroValue, ZeroFlowRule) {
        match value {
            Expression::IntConstant(0) => (ZeroValue::Z, ZeroFlowRule::ZeroConstant),
            Expression::IntConstant(_) | Expression::BoolConstant(_) => {
                (ZeroValue::NZ, ZeroFlowRule::NonZeroConstant)
            }
            Expression::Variable(y) => (env.lookup(&ZeroLattice, y), ZeroFlowRule::Copy),
            Expression::IntBinary {
                left,
                operator,
                right,
            } => match (left.as_ref(), operator, right.as_ref()) {
                (Expression::IntConstant(c), op, Expression::IntConstant(d)) => {
                    match op.evaluate(*c, *d) {
                        Some(0) => (ZeroValue::Z, ZeroFlowRule::ConstantFoldZero),
                        Some(_) => (ZeroValue::NZ, ZeroFlowRule::ConstantFoldNonZero),
                        None => (ZeroValue::U, ZeroFlowRule::ConstantFoldUndefined),
                    }
                }
                (Expression::Variable(y), IntBinaryOperator::Add, Expression::Variable(z)) => {
                    match (env.lookup(&ZeroLattice, y), env.lookup(&ZeroLattice, z)) {
                        (ZeroValue::Z, ZeroValue::Z) => (ZeroValue::Z, ZeroFlowRule::AddZeroVariables),
                        _ => (ZeroValue::U, ZeroFlowRule::AddVariables),
                    }
                }
                (Expression::Variable(y), IntBinaryOperator::Add, Expression::IntConstant(c)) => {
                    add_constant(env.lookup(&ZeroLattice, y), *c)
                }
                (Expression::IntConstant(c), IntBinaryOperator::Add, Expression::Variable(y)) => {
                    let (value, _) = add_constant(env.lookup(&ZeroLattice, y), *c);
                    (value, ZeroFlowRule::CommutedAdd)
                }
                _ => (ZeroValue::U, ZeroFlowRule::Unknown),
            },
            _ => (ZeroValue::U, ZeroFlowRule::Unknown),
        }
    }
}

fn add_constant(y: ZeroValue, c: i64) -> (ZeroValue, ZeroFlowRule) {
    match (y, c) {
        (ZeroValue::Z, 0) => (ZeroValue::Z, ZeroFlowRule::AddZeroToZero),
        (ZeroValue::Z, _) => (ZeroValue::NZ, ZeroFlowRule::AddNonZeroToZero),
        (ZeroValue::NZ, 0) => (ZeroValue::NZ, ZeroFlowRule::AddZeroToNonZero),
        _ => (ZeroValue::U, ZeroFlowRule::AddConstant),
    }
}

impl FlowFunction for ZeroFlow {
    type Value = ZeroValue;
    type Rule = ZeroFlowRule;

    fn get_variables(
        &self,
        statement: &Statement,
        env: &AbstractEnvironment<ZeroValue>,
    ) -> Result<(Bindings<ZeroValue>, ZeroFlowRule), AnalysisError> {
        let Statement::Assignment {
            variable, value, ..
        } = statement
        else {
            return Err(unsupported(statement));
        };
        let (result, rule) = self.evaluate(value, env);
        Ok((Bindings::from([(variable.clone(), result)]), rule))
    }
}
