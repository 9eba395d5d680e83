use small_analysis::{AbstractEnvironment, AnalysisError, Bindings, FlowFunction, unsupported};
use small_ast::{Expression, IntBinaryOperator, Statement};

use crate::bound::Bound;
use crate::lattice::IntervalLattice;
use crate::value::IntervalValue;

/// Which assignment rule fired. Rows are tried in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalFlowRule {
    /// `x = c`
    Constant,
    /// `x = true` or `x = false`
    BoolConstant,
    /// `x = y`
    Copy,
    /// `x = c op d`
    ConstantFold,
    /// `x = c op d` overflowing or dividing by zero.
    ConstantFoldUndefined,
    /// `x = y + c` with `y` an integer interval.
    AddConstant,
    /// `x = y + c` otherwise.
    AddConstantUnknown,
    /// `x = c + y`, answered by the `y + c` rows.
    CommutedAdd,
    /// `x = y - c`, answered by the `y + (-c)` rows.
    SubConstant,
    /// `x = y + z` where the low bounds sum to `-∞ + +∞`.
    AddUndefinedLow,
    /// `x = y + z` where the high bounds sum to `-∞ + +∞`.
    AddUndefinedHigh,
    /// `x = y + z` with a sum whose low bound exceeds its high bound.
    AddEmpty,
    /// `x = y + z`
    Add,
    /// `x = y * z` where the low bounds multiply to `0 · ∞`.
    MulUndefinedLow,
    /// `x = y * z` where the high bounds multiply to `0 · ∞`.
    MulUndefinedHigh,
    /// `x = y * z` with a product whose low bound exceeds its high bound.
    MulEmpty,
    /// `x = y * z` with both operands non-negative.
    MulNonNegative,
    /// Any other right-hand side.
    Unknown,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalFlow {
    lattice: IntervalLattice,
}

impl IntervalFlow {
    pub fn new(lattice: IntervalLattice) -> Self {
        Self { lattice }
    }

    fn evaluate(
        &self,
        value: &Expression,
        env: &AbstractEnvironment<IntervalValue>,
    ) -> (IntervalValue, IntervalFlowRule) {
        use IntervalFlowRule as Rule;

        let lookup = |name: &str| env.lookup(&self.lattice, name);
        match value {
            Expression::IntConstant(c) => (IntervalValue::constant(*c), Rule::Constant),
            Expression::BoolConstant(b) => (IntervalValue::boolean(*b), Rule::BoolConstant),
            Expression::Variable(y) => (lookup(y), Rule::Copy),
            Expression::IntBinary {
                left,
                operator,
                right,
            } => match (left.as_ref(), operator, right.as_ref()) {
                (Expression::IntConstant(c), op, Expression::IntConstant(d)) => {
                    match op.evaluate(*c, *d) {
                        Some(result) => (IntervalValue::constant(result), Rule::ConstantFold),
                        None => (IntervalValue::Top, Rule::ConstantFoldUndefined),
                    }
                }
                (Expression::Variable(y), IntBinaryOperator::Add, Expression::IntConstant(c)) => {
                    add_constant(lookup(y), *c)
                }
                (Expression::IntConstant(c), IntBinaryOperator::Add, Expression::Variable(y)) => {
                    let (value, _) = add_constant(lookup(y), *c);
                    (value, Rule::CommutedAdd)
                }
                (Expression::Variable(y), IntBinaryOperator::Sub, Expression::IntConstant(c)) => {
                    match c.checked_neg() {
                        Some(negated) => {
                            let (value, _) = add_constant(lookup(y), negated);
                            (value, Rule::SubConstant)
                        }
                        None => (IntervalValue::Top, Rule::Unknown),
                    }
                }
                (Expression::Variable(y), IntBinaryOperator::Add, Expression::Variable(z)) => {
                    add_variables(lookup(y), lookup(z))
                }
                (Expression::Variable(y), IntBinaryOperator::Mul, Expression::Variable(z)) => {
                    mul_variables(lookup(y), lookup(z))
                }
                _ => (IntervalValue::Top, Rule::Unknown),
            },
            _ => (IntervalValue::Top, Rule::Unknown),
        }
    }
}

fn add_constant(y: IntervalValue, c: i64) -> (IntervalValue, IntervalFlowRule) {
    match y.as_int() {
        Some((low, high)) => (
            IntervalValue::int(low.shift(c), high.shift(c)),
            IntervalFlowRule::AddConstant,
        ),
        None => (IntervalValue::Top, IntervalFlowRule::AddConstantUnknown),
    }
}

fn add_variables(y: IntervalValue, z: IntervalValue) -> (IntervalValue, IntervalFlowRule) {
    use IntervalFlowRule as Rule;

    let (Some((ly, hy)), Some((lz, hz))) = (y.as_int(), z.as_int()) else {
        return (IntervalValue::Top, Rule::Unknown);
    };
    let Some(low) = ly.checked_add(lz) else {
        return (IntervalValue::Top, Rule::AddUndefinedLow);
    };
    let Some(high) = hy.checked_add(hz) else {
        return (IntervalValue::Top, Rule::AddUndefinedHigh);
    };
    if low > high {
        return (IntervalValue::Top, Rule::AddEmpty);
    }
    (IntervalValue::Int { low, high }, Rule::Add)
}

fn mul_variables(y: IntervalValue, z: IntervalValue) -> (IntervalValue, IntervalFlowRule) {
    use IntervalFlowRule as Rule;

    let (Some((ly, hy)), Some((lz, hz))) = (y.as_int(), z.as_int()) else {
        return (IntervalValue::Top, Rule::Unknown);
    };
    let Some(low) = ly.checked_mul(lz) else {
        return (IntervalValue::Top, Rule::MulUndefinedLow);
    };
    let Some(high) = hy.checked_mul(hz) else {
        return (IntervalValue::Top, Rule::MulUndefinedHigh);
    };
    if low > high {
        return (IntervalValue::Top, Rule::MulEmpty);
    }
    if [ly, hy, lz, hz].into_iter().all(Bound::is_non_negative) {
        return (IntervalValue::Int { low, high }, Rule::MulNonNegative);
    }
    (IntervalValue::Top, Rule::Unknown)
}

impl FlowFunction for IntervalFlow {
    type Value = IntervalValue;
    type Rule = IntervalFlowRule;

    fn get_variables(
        &self,
        statement: &Statement,
        env: &AbstractEnvironment<IntervalValue>,
    ) -> Result<(Bindings<IntervalValue>, IntervalFlowRule), AnalysisError> {
        let Statement::Assignment {
            variable, value, ..
        } = statement
        else {
            return Err(unsupported(statement));
        };
        let (result, rule) = self.evaluate(value, env);
        let result = self.lattice.normalize(result);
        Ok((Bindings::from([(variable.clone(), result)]), rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(entries: &[(&str, IntervalValue)]) -> AbstractEnvironment<IntervalValue> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn assign(
        value: Expression,
        env: &AbstractEnvironment<IntervalValue>,
    ) -> (IntervalValue, IntervalFlowRule) {
        let statement = Statement::assign(1, "x", value);
        let (bindings, rule) = IntervalFlow::default()
            .get_variables(&statement, env)
            .unwrap();
        (bindings["x"], rule)
    }

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    fn op(left: Expression, operator: IntBinaryOperator, right: Expression) -> Expression {
        Expression::binary(left, operator, right)
    }

    #[test]
    fn test_constants() {
        let empty = env(&[]);
        assert_eq!(
            assign(Expression::int(7), &empty),
            (IntervalValue::constant(7), IntervalFlowRule::Constant)
        );
        assert_eq!(
            assign(Expression::bool(false), &empty),
            (IntervalValue::boolean(false), IntervalFlowRule::BoolConstant)
        );
        assert_eq!(
            assign(
                op(Expression::int(0), IntBinaryOperator::Sub, Expression::int(5)),
                &empty
            ),
            (IntervalValue::constant(-5), IntervalFlowRule::ConstantFold)
        );
        assert_eq!(
            assign(
                op(Expression::int(1), IntBinaryOperator::Div, Expression::int(0)),
                &empty
            ),
            (IntervalValue::Top, IntervalFlowRule::ConstantFoldUndefined)
        );
    }

    #[test]
    fn test_large_constants_are_normalized() {
        let (value, _) = assign(Expression::int(1000), &env(&[]));
        assert_eq!(value, IntervalValue::int(500, Bound::PosInf));
    }

    #[test]
    fn test_add_constant_shifts_bounds() {
        let current = env(&[("y", IntervalValue::int(0, Bound::PosInf))]);
        assert_eq!(
            assign(op(var("y"), IntBinaryOperator::Add, Expression::int(1)), &current),
            (
                IntervalValue::int(1, Bound::PosInf),
                IntervalFlowRule::AddConstant
            )
        );
        assert_eq!(
            assign(op(Expression::int(2), IntBinaryOperator::Add, var("y")), &current),
            (
                IntervalValue::int(2, Bound::PosInf),
                IntervalFlowRule::CommutedAdd
            )
        );
        assert_eq!(
            assign(op(var("y"), IntBinaryOperator::Sub, Expression::int(3)), &current),
            (
                IntervalValue::int(-3, Bound::PosInf),
                IntervalFlowRule::SubConstant
            )
        );
    }

    #[test]
    fn test_add_constant_to_non_interval_is_top() {
        let current = env(&[("y", IntervalValue::boolean(true))]);
        assert_eq!(
            assign(op(var("y"), IntBinaryOperator::Add, Expression::int(1)), &current),
            (IntervalValue::Top, IntervalFlowRule::AddConstantUnknown)
        );
        // Unbound variables read as top.
        assert_eq!(
            assign(op(var("w"), IntBinaryOperator::Add, Expression::int(1)), &current),
            (IntervalValue::Top, IntervalFlowRule::AddConstantUnknown)
        );
    }

    #[test]
    fn test_add_variables() {
        let current = env(&[
            ("a", IntervalValue::int(1, 2)),
            ("b", IntervalValue::int(10, 20)),
            ("lo", IntervalValue::int(Bound::NegInf, 0)),
            ("hi", IntervalValue::int(0, Bound::PosInf)),
        ]);
        let add = |y, z| op(var(y), IntBinaryOperator::Add, var(z));
        assert_eq!(
            assign(add("a", "b"), &current),
            (IntervalValue::int(11, 22), IntervalFlowRule::Add)
        );
        assert_eq!(
            assign(add("lo", "hi"), &current),
            (IntervalValue::any_int(), IntervalFlowRule::Add)
        );
        let infinite = env(&[
            ("p", IntervalValue::int(Bound::NegInf, 0)),
            ("q", IntervalValue::int(Bound::PosInf, Bound::PosInf)),
        ]);
        assert_eq!(
            assign(add("p", "q"), &infinite),
            (IntervalValue::Top, IntervalFlowRule::AddUndefinedLow)
        );
    }

    #[test]
    fn test_multiplication_only_for_non_negative_operands() {
        let current = env(&[
            ("f", IntervalValue::int(1, Bound::PosInf)),
            ("i", IntervalValue::int(1, 3)),
            ("n", IntervalValue::int(-2, 3)),
            ("z", IntervalValue::int(0, Bound::PosInf)),
        ]);
        let mul = |y, z| op(var(y), IntBinaryOperator::Mul, var(z));
        assert_eq!(
            assign(mul("f", "i"), &current),
            (
                IntervalValue::int(1, Bound::PosInf),
                IntervalFlowRule::MulNonNegative
            )
        );
        assert_eq!(
            assign(mul("n", "i"), &current),
            (IntervalValue::Top, IntervalFlowRule::Unknown)
        );
        // 0 · +∞ in the high bounds of [0, 0] and [0, +∞].
        let zeros = env(&[
            ("a", IntervalValue::constant(0)),
            ("b", IntervalValue::int(0, Bound::PosInf)),
        ]);
        assert_eq!(
            assign(mul("a", "b"), &zeros),
            (IntervalValue::Top, IntervalFlowRule::MulUndefinedHigh)
        );
    }

    #[test]
    fn test_fallback_is_top() {
        let current = env(&[("b", IntervalValue::constant(2))]);
        let division = op(var("b"), IntBinaryOperator::Div, Expression::int(2));
        assert_eq!(assign(division, &current), (IntervalValue::Top, IntervalFlowRule::Unknown));
        let call = Expression::call("f", vec![var("b")]);
        assert_eq!(assign(call, &current), (IntervalValue::Top, IntervalFlowRule::Unknown));
    }

    #[test]
    fn test_rejects_non_assignment() {
        let statement = Statement::while_loop(3, Expression::bool(true), vec![]);
        let err = IntervalFlow::default()
            .get_variables(&statement, &env(&[]))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedStatement { line: 3, .. }));
    }
}
