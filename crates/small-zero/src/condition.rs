use small_analysis::{AbstractEnvironment, Bindings, ConditionUpdateFunction};
use small_ast::{EqualityOperator, Expression, IntComparisonOperator};

use crate::ZeroValue;

/// Which narrowing rule fired on a branch condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeroConditionRule {
    /// `y < c` with `c <= 0`: `y` is non-zero.
    LessThanNonPositive,
    /// `y < c` otherwise.
    LessThan,
    /// `y > c` with `c >= 0`.
    GreaterThanNonNegative,
    GreaterThan,
    /// `y <= c` with `c < 0`.
    LessOrEqualNegative,
    LessOrEqual,
    /// `y >= c` with `c > 0`.
    GreaterOrEqualPositive,
    GreaterOrEqual,
    /// `y == 0`
    EqualZero,
    /// `y == c` with `c != 0`.
    EqualNonZero,
    /// `y != 0`
    NotEqualZero,
    NotEqual,
    /// Constant on the left, answered by the mirrored rule.
    Commuted,
    /// Literal `false`.
    Infeasible,
    /// No rule applies; the environment is unchanged.
    Identity,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroCondition;

fn bind(name: &str, value: ZeroValue) -> Option<Bindings<ZeroValue>> {
    Some(Bindings::from([(name.to_string(), value)]))
}

impl ZeroCondition {
    fn compare(
        &self,
        y: &str,
        operator: IntComparisonOperator,
        c: i64,
    ) -> (Option<Bindings<ZeroValue>>, ZeroConditionRule) {
        use IntComparisonOperator::*;
        use ZeroConditionRule as Rule;

        match operator {
            Lt if c <= 0 => (bind(y, ZeroValue::NZ), Rule::LessThanNonPositive),
            Lt => (bind(y, ZeroValue::U), Rule::LessThan),
            Gt if c >= 0 => (bind(y, ZeroValue::NZ), Rule::GreaterThanNonNegative),
            Gt => (bind(y, ZeroValue::U), Rule::GreaterThan),
            Lte if c < 0 => (bind(y, ZeroValue::NZ), Rule::LessOrEqualNegative),
            Lte => (bind(y, ZeroValue::U), Rule::LessOrEqual),
            Gte if c > 0 => (bind(y, ZeroValue::NZ), Rule::GreaterOrEqualPositive),
            Gte => (bind(y, ZeroValue::U), Rule::GreaterOrEqual),
        }
    }

    fn equal(
        &self,
        y: &str,
        operator: EqualityOperator,
        c: i64,
    ) -> (Option<Bindings<ZeroValue>>, ZeroConditionRule) {
        match (operator, c) {
            (EqualityOperator::Eq, 0) => (bind(y, ZeroValue::Z), ZeroConditionRule::EqualZero),
            (EqualityOperator::Eq, _) => (bind(y, ZeroValue::NZ), ZeroConditionRule::EqualNonZero),
            (EqualityOperator::Neq, 0) => (bind(y, ZeroValue::NZ), ZeroConditionRule::NotEqualZero),
            (EqualityOperator::Neq, _) => (bind(y, ZeroValue::U), ZeroConditionRule::NotEqual),
        }
    }
}

impl ConditionUpdateFunction for ZeroCondition {
    type Value = ZeroValue;
    type Rule = ZeroConditionRule;

    fn get_variables(
        &self,
        condition: &Expression,
        _env: &AbstractEnvironment<ZeroValue>,
    ) -> (Option<Bindings<ZeroValue>>, ZeroConditionRule) {
        match condition {
            Expression::IntComparison {
                left,
                operator,
                right,
            } => match (left.as_ref(), right.as_ref()) {
                (Expression::Variable(y), Expression::IntConstant(c)) => {
                    self.compare(y, *operator, *c)
                }
                (Expression::IntConstant(c), Expression::Variable(y)) => {
                    let (bindings, _) = self.compare(y, operator.flip(), *c);
                    (bindings, ZeroConditionRule::Commuted)
                }
                _ => (Some(Bindings::new()), ZeroConditionRule::Identity),
            },
            Expression::EqualComparison {
                left,
                operator,
                right,
            } => match (left.as_ref(), right.as_ref()) {
                (Expression::Variable(y), Expression::IntConstant(c)) => {
                    self.equal(y, *operator, *c)
                }
                (Expression::IntConstant(c), Expression::Variable(y)) => {
                    let (bindings, _) = self.equal(y, *operator, *c);
                    (bindings, ZeroConditionRule::Commuted)
                }
                _ => (Some(Bindings::new()), ZeroConditionRule::Identity),
            },
            Expression::BoolConstant(false) => (None, ZeroConditionRule::Infeasible),
            _ => (Some(Bindings::new()), ZeroConditionRule::Identity),
        }
    }
}
